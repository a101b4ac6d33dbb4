use async_trait::async_trait;
use dyn_clone::DynClone;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{completion_result::CompletionResult, errors::ServiceError};

/// A service that generates text completions from a remote LLM.
///
/// Implementations build the conversation with
/// [`build_turns`](crate::chat_completion::build_turns), call their provider, and normalize the
/// outcome. Every failure of a call is a [`ServiceError`].
#[async_trait]
pub trait LlmService: Send + Sync + DynClone + std::fmt::Debug {
    async fn generate_response(
        &self,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError>;

    /// Like `generate_response`, but gives up as soon as `cancel` fires.
    ///
    /// The in-flight provider call is dropped, which aborts the underlying request.
    async fn generate_response_with_cancellation(
        &self,
        cancel: &CancellationToken,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ServiceError::cancelled(instructions, input)),
            result = self.generate_response(instructions, input, max_tokens) => result,
        }
    }

    fn name(&self) -> &'static str {
        let name = std::any::type_name::<Self>();
        name.split("::").last().unwrap_or(name)
    }
}

#[async_trait]
impl LlmService for Box<dyn LlmService> {
    async fn generate_response(
        &self,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError> {
        (**self)
            .generate_response(instructions, input, max_tokens)
            .await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl LlmService for Arc<dyn LlmService> {
    async fn generate_response(
        &self,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError> {
        (**self)
            .generate_response(instructions, input, max_tokens)
            .await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl LlmService for &dyn LlmService {
    async fn generate_response(
        &self,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError> {
        (**self)
            .generate_response(instructions, input, max_tokens)
            .await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<LLM> From<&LLM> for Box<dyn LlmService>
where
    LLM: LlmService + Clone + 'static,
{
    fn from(llm: &LLM) -> Self {
        Box::new(llm.clone()) as Box<dyn LlmService>
    }
}

dyn_clone::clone_trait_object!(LlmService);
