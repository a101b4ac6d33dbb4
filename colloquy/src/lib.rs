//! # Colloquy
//!
//! Colloquy puts remote large language models behind one small contract: give a service some
//! instructions, an input and a token ceiling, and get back the generated text and the tokens it
//! cost, or an error that tells you whether your credentials or your rate limit are to blame.
//!
//! Inputs are either plain text or a JSON conversation of the shape
//! `{"messages": [{"role": "user", "content": "..."}]}`, which is replayed turn by turn.
//!
//! ## Example
//!
//! ```no_run
//! # use colloquy::{LlmModel, LlmService};
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let model: LlmModel = serde_json::from_str(r#"{
//!     "type": "openai",
//!     "model": "gpt-4o-mini",
//!     "config": {"api_key": "sk-..."}
//! }"#)?;
//!
//! let http_client = reqwest::Client::new();
//! let service = colloquy::build_service(&model, &http_client)?;
//!
//! let result = service
//!     .generate_response("Answer in one word.", "What color is the sky?", 16)
//!     .await?;
//!
//! println!("{} ({} tokens)", result.output, result.tokens_used);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! `openai` is enabled by default and registers the `openai` and `openai_compatible` service
//! types.

use lazy_static::lazy_static;

#[doc(inline)]
pub use colloquy_core::chat_completion;
#[doc(inline)]
pub use colloquy_core::prelude;
#[doc(inline)]
pub use colloquy_core::{LlmModel, LlmService, ServiceFactory, ServiceRegistry};

use colloquy_core::chat_completion::errors::ConfigError;

/// Integrations with LLM providers.
pub mod integrations {
    #[doc(inline)]
    pub use colloquy_integrations::*;
}

#[cfg(feature = "test-utils")]
#[doc(inline)]
pub use colloquy_core::test_utils;

lazy_static! {
    static ref REGISTRY: ServiceRegistry = {
        let mut registry = ServiceRegistry::new();
        colloquy_integrations::register_all(&mut registry);

        tracing::debug!(types = ?registry.types(), "Initialized LLM service registry");

        registry
    };
}

/// The registry holding every enabled integration
pub fn registry() -> &'static ServiceRegistry {
    &REGISTRY
}

/// Builds a service from a stored model configuration with the global registry.
///
/// Services built from the same `http_client` share its connection pool.
///
/// # Errors
///
/// Errors if the model's type is not registered, or if its config is incomplete or invalid.
pub fn build_service(
    model: &LlmModel,
    http_client: &reqwest::Client,
) -> Result<Box<dyn LlmService>, ConfigError> {
    registry().build(model, http_client)
}
