//! This module provides integration with `OpenAI`'s chat completions api, and with any api that
//! speaks the same protocol. It includes the `OpenAI` struct, which implements
//! [`LlmService`], and the factories that build it from an [`LlmModel`].
//!
//! Requests go through an injected [`reqwest::Client`], so that one connection pool can be shared
//! by every configured model.

use std::time::Duration;

use colloquy_core::{
    LlmModel, LlmService, ServiceRegistry, chat_completion::errors::ConfigError,
};
use derive_builder::Builder;

mod chat_completion;
mod config;
mod errors;

pub use chat_completion::response_to_completion_result;
pub use config::{OpenAIConfig, OpenAIConfigBuilder};
pub use errors::{ProviderError, openai_error_to_service_error};

/// Registry key of the hosted `OpenAI` api
pub const TYPE_OPENAI: &str = "openai";
/// Registry key of self hosted or third party apis speaking the `OpenAI` protocol
pub const TYPE_OPENAI_COMPATIBLE: &str = "openai_compatible";

/// Config key holding the api key. Required.
pub const CONFIG_API_KEY: &str = "api_key";
/// Config key overriding the api base url. Required for `openai_compatible`.
pub const CONFIG_BASE_URL: &str = "base_url";

/// The `OpenAI` struct holds the HTTP client, the api configuration and the default options for
/// prompting. It uses the `Builder` pattern for flexible and customizable instantiation.
///
/// # Example
///
/// ```no_run
/// # use colloquy_integrations::openai::{OpenAI, OpenAIConfig};
/// // Uses the OPENAI_API_KEY environment variable
/// let openai = OpenAI::builder()
///     .default_prompt_model("gpt-4o-mini")
///     .build()
///     .unwrap();
///
/// // Talks to a local server with a shared client
/// let mut config = OpenAIConfig::new("not-needed");
/// config.with_api_base("http://localhost:11434/v1");
///
/// let openai = OpenAI::builder()
///     .http_client(reqwest::Client::new())
///     .config(config)
///     .default_prompt_model("llama3.1")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Builder, Clone)]
#[builder(setter(into, strip_option))]
pub struct OpenAI {
    /// Cheap to clone, clones share their connection pool
    #[builder(default = reqwest::Client::new())]
    http_client: reqwest::Client,

    #[builder(default)]
    config: OpenAIConfig,

    #[builder(default)]
    pub(crate) default_options: Options,
}

/// Options applied to every completion the `OpenAI` struct makes
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into, strip_option))]
pub struct Options {
    /// The model to prompt. Calls fail without one.
    #[builder(default)]
    pub prompt_model: Option<String>,

    /// Upper bound for a single request, including reading the response
    #[builder(default)]
    pub request_timeout: Option<Duration>,
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }
}

impl OpenAI {
    pub fn builder() -> OpenAIBuilder {
        OpenAIBuilder::default()
    }

    /// Builds a service for the hosted api from a stored model configuration.
    ///
    /// `base_url` is optional and overrides the default api base.
    ///
    /// # Errors
    ///
    /// Errors if the config has no `api_key`, or if `base_url` is not a valid url.
    pub fn from_model(model: &LlmModel, http_client: reqwest::Client) -> Result<Self, ConfigError> {
        let api_key = model
            .config_str(CONFIG_API_KEY)
            .ok_or(ConfigError::Incomplete { uuid: model.uuid })?;

        let mut config = OpenAIConfig::new(api_key);
        if let Some(base_url) = model.config_str(CONFIG_BASE_URL) {
            config.with_api_base(&parse_base_url(model, base_url)?);
        }

        Ok(Self {
            http_client,
            config,
            default_options: Options {
                prompt_model: Some(model.model.clone()),
                ..Default::default()
            },
        })
    }

    /// Like [`OpenAI::from_model`], but `base_url` is required.
    ///
    /// # Errors
    ///
    /// Errors if the config has no `api_key` or no `base_url`, or if `base_url` is not a valid
    /// url.
    pub fn from_compatible_model(
        model: &LlmModel,
        http_client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        if model.config_str(CONFIG_BASE_URL).is_none() {
            return Err(ConfigError::Incomplete { uuid: model.uuid });
        }

        Self::from_model(model, http_client)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    pub fn options(&self) -> &Options {
        &self.default_options
    }
}

impl OpenAIBuilder {
    /// Sets the default prompt model for the `OpenAI` instance.
    pub fn default_prompt_model(&mut self, model: impl Into<String>) -> &mut Self {
        self.default_options
            .get_or_insert_with(Options::default)
            .prompt_model = Some(model.into());
        self
    }

    /// Bounds every request made by the `OpenAI` instance.
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.default_options
            .get_or_insert_with(Options::default)
            .request_timeout = Some(timeout);
        self
    }
}

fn parse_base_url(model: &LlmModel, base_url: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(base_url).map_err(|err| ConfigError::Invalid {
        uuid: model.uuid,
        key: CONFIG_BASE_URL.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            uuid: model.uuid,
            key: CONFIG_BASE_URL.to_string(),
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

fn build_openai(
    model: &LlmModel,
    http_client: &reqwest::Client,
) -> Result<Box<dyn LlmService>, ConfigError> {
    Ok(Box::new(OpenAI::from_model(model, http_client.clone())?))
}

fn build_openai_compatible(
    model: &LlmModel,
    http_client: &reqwest::Client,
) -> Result<Box<dyn LlmService>, ConfigError> {
    Ok(Box::new(OpenAI::from_compatible_model(
        model,
        http_client.clone(),
    )?))
}

/// Registers the `openai` and `openai_compatible` service types
pub fn register(registry: &mut ServiceRegistry) {
    registry
        .register(TYPE_OPENAI, build_openai)
        .register(TYPE_OPENAI_COMPATIBLE, build_openai_compatible);
}
