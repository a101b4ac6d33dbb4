use derive_builder::Builder;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;

use super::errors::ProviderError;

pub(crate) const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Where and as whom to reach an `OpenAI` compatible chat completions api
#[derive(Clone, Debug, Deserialize, Builder)]
#[serde(default)]
#[builder(setter(into))]
pub struct OpenAIConfig {
    #[builder(default = OPENAI_API_BASE.to_string())]
    api_base: String,
    api_key: SecretString,
}

impl OpenAIConfig {
    pub fn builder() -> OpenAIConfigBuilder {
        OpenAIConfigBuilder::default()
    }

    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_base: OPENAI_API_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the api base, i.e. `http://localhost:11434/v1`. Trailing slashes are dropped.
    pub fn with_api_base(&mut self, api_base: &str) -> &mut Self {
        self.api_base = api_base.trim_end_matches('/').to_string();

        self
    }

    pub fn with_api_key(&mut self, api_key: impl Into<SecretString>) -> &mut Self {
        self.api_key = api_key.into();

        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// # Errors
    ///
    /// Errors if the api key cannot be used as a header value
    pub fn headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
                .map_err(|_| ProviderError::InvalidArgument("api key is not a valid header".into()))?;
        authorization.set_sensitive(true);

        headers.insert(AUTHORIZATION, authorization);

        Ok(headers)
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new(std::env::var("OPENAI_API_KEY").unwrap_or_else(|_| String::new()))
    }
}
