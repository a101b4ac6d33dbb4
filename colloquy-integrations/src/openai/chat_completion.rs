use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use colloquy_core::{
    LlmService,
    chat_completion::{
        CompletionRequest, CompletionResult, ConversationTurn, Role,
        errors::{ErrorCode, ServiceError},
    },
    util::truncate_for_log,
};

use super::{
    OpenAI,
    errors::{ProviderError, openai_error_to_service_error},
};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

#[async_trait]
impl LlmService for OpenAI {
    #[tracing::instrument(skip_all, err, fields(max_tokens = max_tokens))]
    async fn generate_response(
        &self,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError> {
        let Some(model) = self.default_options.prompt_model.as_deref() else {
            return Err(ServiceError::new(
                "Model not set",
                ErrorCode::Unknown,
                instructions,
                input,
            ));
        };

        let request = CompletionRequest::from_prompt(model, instructions, input, max_tokens);

        self.complete(&request)
            .await
            .map_err(|err| openai_error_to_service_error(&err, instructions, input))
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }
}

impl OpenAI {
    /// Sends a prepared conversation and normalizes the response
    ///
    /// # Errors
    ///
    /// Errors if the request cannot be built, sent, or decoded, or if the api answers with a
    /// non-success status.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let openai_request = completion_request_to_openai(request)?;

        tracing::debug!(
            model = request.model(),
            turns = request.turns().len(),
            max_tokens = request.max_output_tokens(),
            "Sending request to OpenAI"
        );
        tracing::trace!(
            request = truncate_for_log(
                serde_json::to_string(&openai_request).unwrap_or_default(),
                500
            ),
            "Request payload"
        );

        let response = self.send(&openai_request).await?;

        tracing::debug!(
            choices = response.choices.len(),
            total_tokens = response.usage.as_ref().map(|usage| usage.total_tokens),
            "Received response from OpenAI"
        );

        Ok(response_to_completion_result(&response))
    }

    async fn send(
        &self,
        request: &CreateChatCompletionRequest,
    ) -> Result<CreateChatCompletionResponse, ProviderError> {
        let mut builder = self
            .http_client
            .post(self.config.url(CHAT_COMPLETIONS_PATH))
            .headers(self.config.headers()?)
            .json(request);

        if let Some(timeout) = self.default_options.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            // An unreadable error body must not hide the status
            let body = response.text().await.unwrap_or_default();
            tracing::trace!(%status, body = truncate_for_log(&body, 500), "Error response");
            return Err(ProviderError::from_response(status, &body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ProviderError::from)
    }
}

/// Takes the text and total token count of the first choice.
///
/// A response without choices is a successful, empty completion with zero tokens used.
pub fn response_to_completion_result(response: &CreateChatCompletionResponse) -> CompletionResult {
    let Some(choice) = response.choices.first() else {
        return CompletionResult::empty();
    };

    CompletionResult::new(
        choice.message.content.clone().unwrap_or_default(),
        response.usage.as_ref().map_or(0, |usage| usage.total_tokens),
    )
}

#[allow(deprecated)]
fn completion_request_to_openai(
    request: &CompletionRequest,
) -> Result<CreateChatCompletionRequest, ProviderError> {
    let messages = request
        .turns()
        .iter()
        .map(turn_to_openai)
        .collect::<Result<Vec<_>, _>>()?;

    // `max_tokens` rather than `max_completion_tokens`, compatible servers rarely know the latter
    CreateChatCompletionRequestArgs::default()
        .model(request.model())
        .messages(messages)
        .temperature(request.temperature())
        .max_tokens(request.max_output_tokens())
        .build()
        .map_err(ProviderError::from)
}

fn turn_to_openai(turn: &ConversationTurn) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let message = match turn.role() {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(turn.content())
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.content())
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.content())
            .build()?
            .into(),
    };

    Ok(message)
}
