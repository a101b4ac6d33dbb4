pub use async_trait::async_trait;
pub use derive_builder::Builder;
pub use std::sync::Arc;
pub use tokio_util::sync::CancellationToken;
pub use tracing::Instrument;

pub use crate::chat_completion::{
    CompletionRequest, CompletionResult, ConversationTurn, Role, build_turns,
    errors::{ConfigError, ErrorCode, ServiceError},
};
pub use crate::{LlmModel, LlmService, ServiceRegistry};
