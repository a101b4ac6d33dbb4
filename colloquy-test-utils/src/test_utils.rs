#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use colloquy_core::LlmModel;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use colloquy_integrations as integrations;

pub fn openai_client(mock_server_uri: &str, prompt_model: &str) -> integrations::openai::OpenAI {
    let mut config = integrations::openai::OpenAIConfig::new("sk-test");
    config.with_api_base(mock_server_uri);

    integrations::openai::OpenAI::builder()
        .config(config)
        .default_prompt_model(prompt_model)
        .build()
        .expect("Can create OpenAI client.")
}

/// A stored model configuration of the given type, pointing at the mock server
pub fn openai_model(llm_type: &str, mock_server_uri: &str, prompt_model: &str) -> LlmModel {
    LlmModel::builder()
        .name("test model")
        .llm_type(llm_type)
        .model(prompt_model)
        .config_value("api_key", "sk-test")
        .config_value("base_url", mock_server_uri)
        .build()
        .expect("Can build model config.")
}

/// A chat completion response body with one choice per item in `contents`
pub fn chat_completion_response(contents: &[&str], total_tokens: u32) -> Value {
    let choices = contents
        .iter()
        .enumerate()
        .map(|(index, content)| {
            json!({
                "index": index,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop",
                "logprobs": null
            })
        })
        .collect::<Vec<_>>();

    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": choices,
        "usage": {
            "prompt_tokens": total_tokens,
            "completion_tokens": 0,
            "total_tokens": total_tokens
        }
    })
}

/// An `OpenAI` shaped error body
pub fn error_response(message: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    })
}

/// Answers every chat completion request on the mock server with `response`
pub async fn mock_chat_completion(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}
