use colloquy_core::chat_completion::errors::ServiceError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Everything that can go wrong talking to an `OpenAI` compatible api
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The api answered with a non-success status
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Transport failures: connection errors, timeouts, unreadable success bodies
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<async_openai::error::OpenAIError> for ProviderError {
    fn from(error: async_openai::error::OpenAIError) -> Self {
        ProviderError::InvalidArgument(error.to_string())
    }
}

#[derive(Deserialize)]
struct WrappedError {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ProviderError {
    /// Builds an api error from a non-success response.
    ///
    /// Uses the `error.message` of `OpenAI` shaped bodies, and the raw body otherwise.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<WrappedError>(body) {
            Ok(wrapped) => wrapped.error.message,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        ProviderError::Api { status, message }
    }

    /// The HTTP status of an api error. Transport and decode failures have none.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Classifies a failed call into a [`ServiceError`], keeping the call's instructions and input.
///
/// 401 maps to credentials, 429 to rate limit, everything else is unknown.
pub fn openai_error_to_service_error(
    error: &ProviderError,
    instructions: &str,
    input: &str,
) -> ServiceError {
    ServiceError::from_status(
        error.to_string(),
        error.status().map(|status| status.as_u16()),
        instructions,
        input,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::chat_completion::errors::ErrorCode;
    use test_case::test_case;

    #[test_case(401, ErrorCode::Credentials ; "unauthorized")]
    #[test_case(429, ErrorCode::RateLimit ; "too many requests")]
    #[test_case(400, ErrorCode::Unknown ; "bad request")]
    #[test_case(403, ErrorCode::Unknown ; "forbidden")]
    #[test_case(500, ErrorCode::Unknown ; "internal server error")]
    #[test_case(503, ErrorCode::Unknown ; "service unavailable")]
    fn test_api_error_classification(status: u16, expected: ErrorCode) {
        let error = ProviderError::from_response(
            StatusCode::from_u16(status).unwrap(),
            r#"{"error": {"message": "nope", "type": "whatever", "code": null}}"#,
        );

        let service_error = openai_error_to_service_error(&error, "instr", "input");

        assert_eq!(service_error.code, expected);
        assert_eq!(service_error.message, error.to_string());
        assert_eq!(service_error.instructions, "instr");
        assert_eq!(service_error.input, "input");
    }

    #[test]
    fn test_non_api_errors_are_unknown() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ProviderError::from(json_error);

        let service_error = openai_error_to_service_error(&error, "", "input");

        assert_eq!(service_error.code, ErrorCode::Unknown);
        assert!(service_error.message.starts_with("invalid json"));
        assert_eq!(service_error.input, "input");
    }

    #[test]
    fn test_message_from_openai_body() {
        let error = ProviderError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}}"#,
        );

        assert_eq!(
            error.to_string(),
            "401 Unauthorized: Incorrect API key provided"
        );
    }

    #[test]
    fn test_message_from_raw_body() {
        let error = ProviderError::from_response(StatusCode::BAD_GATEWAY, "  upstream down \n");
        assert_eq!(error.to_string(), "502 Bad Gateway: upstream down");
    }

    #[test]
    fn test_message_from_empty_body() {
        let error = ProviderError::from_response(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(
            error.to_string(),
            "429 Too Many Requests: Too Many Requests"
        );
        assert_eq!(error.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    }
}
