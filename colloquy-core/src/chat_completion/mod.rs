//! This module enables the implementation of text completion on LLM providers
//!
//! The main trait to implement is `LlmService`, which takes an instruction string, a free form
//! input string and a token ceiling, and returns a `CompletionResult`.
//!
//! Before a provider is called, `build_turns` turns the instructions and input into an ordered
//! list of `ConversationTurn`. Inputs shaped like `{"messages": [...]}` are expanded into multiple
//! turns, anything else becomes a single user turn.
mod completion_request;
mod completion_result;
mod conversation_turn;
pub mod errors;
mod message_builder;
mod structured_input;

// Re-exported in the root per convention
pub mod traits;

pub use completion_request::*;
pub use completion_result::*;
pub use conversation_turn::*;
pub use message_builder::*;
pub use structured_input::*;
pub use traits::*;
