use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Coarse classification of a failed completion, independent of any provider's error types
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIs,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    #[default]
    Unknown,
    /// The provider rejected the credentials (HTTP 401)
    Credentials,
    /// The provider is throttling requests (HTTP 429)
    RateLimit,
}

impl ErrorCode {
    pub fn from_http_status(status: Option<u16>) -> Self {
        match status {
            Some(401) => ErrorCode::Credentials,
            Some(429) => ErrorCode::RateLimit,
            _ => ErrorCode::Unknown,
        }
    }
}

/// The error every `LlmService` surfaces to its caller.
///
/// Carries the instructions and input of the failing call so callers can log or store them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    pub code: ErrorCode,
    pub instructions: String,
    pub input: String,
}

impl ServiceError {
    pub fn new(
        message: impl Into<String>,
        code: ErrorCode,
        instructions: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            instructions: instructions.into(),
            input: input.into(),
        }
    }

    /// Classifies a provider failure by the HTTP status it carried, if any
    pub fn from_status(
        message: impl Into<String>,
        status: Option<u16>,
        instructions: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self::new(
            message,
            ErrorCode::from_http_status(status),
            instructions,
            input,
        )
    }

    /// The caller cancelled the call before the provider answered
    pub fn cancelled(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self::new(
            "request cancelled",
            ErrorCode::Unknown,
            instructions,
            input,
        )
    }

    pub fn is_credentials(&self) -> bool {
        self.code.is_credentials()
    }

    pub fn is_rate_limit(&self) -> bool {
        self.code.is_rate_limit()
    }
}

/// Failures while constructing a service. These are never `ServiceError`s.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config incomplete for LLM: {uuid}")]
    Incomplete { uuid: Uuid },

    #[error("invalid `{key}` in config for LLM {uuid}: {reason}")]
    Invalid {
        uuid: Uuid,
        key: String,
        reason: String,
    },

    #[error("no LLM service registered for type `{0}`")]
    UnknownType(String),
}
