//! Configuration record describing a single LLM a service can be built from.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// An LLM as configured by the caller: which provider type to use, which model to ask for and
/// provider specific settings such as credentials.
///
/// # Example
///
/// ```
/// # use colloquy_core::LlmModel;
/// let model: LlmModel = serde_json::from_str(r#"{
///     "uuid": "9a1f3c6e-8e4b-4c55-9d0c-5a6a1cb2d4f1",
///     "name": "Support bot",
///     "type": "openai",
///     "model": "gpt-4o-mini",
///     "config": {"api_key": "sk-..."}
/// }"#).unwrap();
///
/// assert_eq!(model.config_str("api_key"), Some("sk-..."));
/// assert_eq!(model.config_str("base_url"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct LlmModel {
    #[builder(default = Uuid::new_v4())]
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,

    #[builder(default)]
    #[serde(default)]
    pub name: String,

    /// Registry key of the service type, i.e. `openai`
    #[serde(rename = "type")]
    pub llm_type: String,

    /// Provider side model identifier
    pub model: String,

    #[builder(default)]
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl LlmModel {
    pub fn builder() -> LlmModelBuilder {
        LlmModelBuilder::default()
    }

    /// Returns a string config value, treating missing, non-string and blank values as unset
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

impl LlmModelBuilder {
    /// Adds a single provider specific config value
    pub fn config_value(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.config
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}
