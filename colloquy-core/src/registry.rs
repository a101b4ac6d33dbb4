//! A typed map from service type to the factory that builds it.
//!
//! Adapters register themselves under one or more type keys; callers build a service from an
//! [`LlmModel`] without knowing which adapter backs it.
use std::{collections::HashMap, fmt, sync::Arc};

use crate::{LlmModel, LlmService, chat_completion::errors::ConfigError};

/// Builds a service from its configuration and the shared HTTP client
pub type ServiceFactory = Arc<
    dyn Fn(&LlmModel, &reqwest::Client) -> Result<Box<dyn LlmService>, ConfigError> + Send + Sync,
>;

#[derive(Clone, Default)]
pub struct ServiceRegistry {
    factories: HashMap<String, ServiceFactory>,
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("types", &self.types())
            .finish()
    }
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `llm_type`, replacing any earlier registration for it
    pub fn register<F>(&mut self, llm_type: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&LlmModel, &reqwest::Client) -> Result<Box<dyn LlmService>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(llm_type.into(), Arc::new(factory));
        self
    }

    /// Registers the same factory under several type keys
    pub fn register_many<F>(&mut self, llm_types: &[&str], factory: F) -> &mut Self
    where
        F: Fn(&LlmModel, &reqwest::Client) -> Result<Box<dyn LlmService>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        let factory: ServiceFactory = Arc::new(factory);
        for llm_type in llm_types {
            self.insert((*llm_type).to_string(), Arc::clone(&factory));
        }
        self
    }

    fn insert(&mut self, llm_type: String, factory: ServiceFactory) {
        if self.factories.insert(llm_type.clone(), factory).is_some() {
            tracing::warn!(%llm_type, "Replaced existing LLM service registration");
        }
    }

    pub fn contains(&self, llm_type: &str) -> bool {
        self.factories.contains_key(llm_type)
    }

    /// All registered type keys, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types = self.factories.keys().map(String::as_str).collect::<Vec<_>>();
        types.sort_unstable();
        types
    }

    /// Builds the service registered for `model.llm_type`
    ///
    /// # Errors
    ///
    /// Errors if no factory is registered for the type, or if the factory rejects the config.
    #[tracing::instrument(skip_all, fields(llm_type = %model.llm_type, uuid = %model.uuid), err)]
    pub fn build(
        &self,
        model: &LlmModel,
        http_client: &reqwest::Client,
    ) -> Result<Box<dyn LlmService>, ConfigError> {
        let factory = self
            .factories
            .get(&model.llm_type)
            .ok_or_else(|| ConfigError::UnknownType(model.llm_type.clone()))?;

        factory(model, http_client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_completion::{CompletionResult, errors::ServiceError};
    use async_trait::async_trait;

    #[derive(Clone, Debug)]
    struct Canned(String);

    #[async_trait]
    impl LlmService for Canned {
        async fn generate_response(
            &self,
            _instructions: &str,
            _input: &str,
            _max_tokens: u32,
        ) -> Result<CompletionResult, ServiceError> {
            Ok(CompletionResult::new(self.0.clone(), 0))
        }
    }

    fn canned(model: &LlmModel, _: &reqwest::Client) -> Result<Box<dyn LlmService>, ConfigError> {
        match model.config_str("api_key") {
            Some(_) => Ok(Box::new(Canned(model.model.clone()))),
            None => Err(ConfigError::Incomplete { uuid: model.uuid }),
        }
    }

    fn model(llm_type: &str, api_key: Option<&str>) -> LlmModel {
        let mut builder = LlmModel::builder();
        builder.llm_type(llm_type).model("canned-model");
        if let Some(api_key) = api_key {
            builder.config_value("api_key", api_key);
        }
        builder.build().unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn test_build_registered_type() {
        let mut registry = ServiceRegistry::new();
        registry.register_many(&["canned", "canned_alias"], canned);

        assert_eq!(registry.types(), vec!["canned", "canned_alias"]);

        let http_client = reqwest::Client::new();
        for llm_type in ["canned", "canned_alias"] {
            let service = registry
                .build(&model(llm_type, Some("key")), &http_client)
                .unwrap();
            let result = service.generate_response("", "hi", 10).await.unwrap();
            assert_eq!(result.output, "canned-model");
        }
    }

    #[test]
    fn test_build_unknown_type() {
        let registry = ServiceRegistry::new();
        let err = registry
            .build(&model("nope", Some("key")), &reqwest::Client::new())
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownType(ref t) if t == "nope"));
    }

    #[test]
    fn test_factory_errors_are_returned_as_is() {
        let mut registry = ServiceRegistry::new();
        registry.register("canned", canned);

        let model = model("canned", None);
        let err = registry
            .build(&model, &reqwest::Client::new())
            .unwrap_err();

        assert!(matches!(err, ConfigError::Incomplete { uuid } if uuid == model.uuid));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ServiceRegistry::new();
        registry.register("canned", canned);
        registry.register("canned", |model: &LlmModel, _: &reqwest::Client| {
            Err(ConfigError::Incomplete { uuid: model.uuid })
        });

        assert_eq!(registry.types(), vec!["canned"]);
        assert!(
            registry
                .build(&model("canned", Some("key")), &reqwest::Client::new())
                .is_err()
        );
    }
}
