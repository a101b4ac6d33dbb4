#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Provider independent building blocks for LLM completion adapters.
//!
//! Adapters turn an instruction string and a free form input string into role tagged
//! conversation turns, call a provider, and normalize whatever comes back into a
//! [`chat_completion::CompletionResult`] or a [`chat_completion::errors::ServiceError`].

pub mod chat_completion;
pub mod config;
pub mod registry;

pub use crate::chat_completion::traits::*;
pub use crate::config::LlmModel;
pub use crate::registry::{ServiceFactory, ServiceRegistry};

/// Re-export of commonly used dependencies.
pub mod prelude;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub mod util;
