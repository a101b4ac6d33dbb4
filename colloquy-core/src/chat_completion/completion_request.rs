use derive_builder::Builder;

use super::{conversation_turn::ConversationTurn, message_builder::build_turns};

/// Sampling temperature sent with every completion.
///
/// Near zero so that identical conversations yield reproducible completions.
pub const DEFAULT_TEMPERATURE: f32 = 0.000_001;

/// A completion request represents a conversation and the limits under which any LLM should
/// complete it.
///
/// The temperature is not configurable and is always [`DEFAULT_TEMPERATURE`].
#[derive(Builder, Clone, PartialEq, Debug)]
#[builder(setter(into))]
pub struct CompletionRequest {
    model: String,
    #[builder(default)]
    turns: Vec<ConversationTurn>,
    #[builder(setter(skip), default = DEFAULT_TEMPERATURE)]
    temperature: f32,
    max_output_tokens: u32,
}

impl CompletionRequest {
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }

    /// Builds the request for a single `generate_response` call.
    pub fn from_prompt(
        model: impl Into<String>,
        instructions: &str,
        input: &str,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            turns: build_turns(instructions, input),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }
}
