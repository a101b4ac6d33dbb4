use serde::{Deserialize, Serialize};

/// The normalized outcome of a successful completion
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Text of the first completion choice
    pub output: String,
    /// Total tokens the provider billed for the call
    pub tokens_used: u32,
}

impl CompletionResult {
    pub fn new(output: impl Into<String>, tokens_used: u32) -> Self {
        Self {
            output: output.into(),
            tokens_used,
        }
    }

    /// The provider answered without any choices. Not an error.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}
