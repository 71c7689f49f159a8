//! Scenario run configuration

use crate::cache::ResponseCache;
use crate::error::{Result, ScenarioError};
use agent_llm::ModelId;
use agent_utils::Settings;
use serde::{Deserialize, Serialize};

/// Max turns used when a scenario does not set its own
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Configuration shared by every scenario of a run
///
/// Built once (usually from [`Settings`]) and passed by reference; nothing
/// here is read from or written to the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Model for the user simulator and judge, e.g. `azure/gpt-4o`
    pub default_model: String,

    /// Namespace for cached replies; empty disables caching
    pub cache_key: String,

    /// Log every conversation message at info level
    pub verbose: bool,
}

impl ScenarioConfig {
    /// Derive a configuration from loaded settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_model: settings.default_model(),
            cache_key: settings.cache_key.clone(),
            ..Self::default()
        }
    }

    /// Set the default model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the cache key
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    /// Enable verbose transcript logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Parse the default model id
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Configuration`] if the id is not
    /// `provider/name`
    pub fn model_id(&self) -> Result<ModelId> {
        ModelId::parse(&self.default_model)
            .map_err(|e| ScenarioError::Configuration(format!("default model: {e}")))
    }

    /// A response cache for this run's cache key
    pub fn response_cache(&self) -> ResponseCache {
        ResponseCache::new(&self.cache_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = Settings::from_lookup(|key| match key {
            "AZURE_OPENAI_DEPLOYMENT_NAME" => Some("gpt-4o".to_string()),
            "SCENARIO_CACHE_KEY" => Some("azure_aoai".to_string()),
            _ => None,
        });

        let config = ScenarioConfig::from_settings(&settings);
        assert_eq!(config.default_model, "azure/gpt-4o");
        assert_eq!(config.cache_key, "azure_aoai");
        assert!(!config.verbose);

        let model = config.model_id().unwrap();
        assert_eq!(model.provider, "azure");
        assert_eq!(model.name, "gpt-4o");
    }

    #[test]
    fn test_bad_model_id() {
        let config = ScenarioConfig::default().with_default_model("/gpt-4o");
        assert!(matches!(config.model_id(), Err(ScenarioError::Configuration(_))));
    }

    #[test]
    fn test_empty_cache_key_disables_cache() {
        let config = ScenarioConfig::default();
        assert!(!config.response_cache().is_enabled());
        assert!(config.with_cache_key("k").response_cache().is_enabled());
    }
}
