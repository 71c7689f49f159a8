//! Environment-backed settings
//!
//! Settings are read once and passed around explicitly. Missing values fall
//! back to empty strings: a misconfigured environment is not rejected here,
//! it surfaces later as an authentication failure from the remote service.

use serde::{Deserialize, Serialize};

/// Well-known environment variable names
pub mod vars {
    /// Azure OpenAI API key
    pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
    /// Azure OpenAI resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
    /// Name of the chat deployment
    pub const AZURE_OPENAI_DEPLOYMENT_NAME: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
    /// REST API version sent as the `api-version` query parameter
    pub const AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
    /// Key namespacing cached agent replies; empty disables caching
    pub const SCENARIO_CACHE_KEY: &str = "SCENARIO_CACHE_KEY";
}

/// API version used when `AZURE_OPENAI_API_VERSION` is unset
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-10-21";

/// Connection settings for an Azure OpenAI chat deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureOpenAISettings {
    /// Deployment name (also used as the model identifier)
    pub deployment_name: String,
    /// Resource endpoint
    pub endpoint: String,
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// REST API version
    pub api_version: String,
}

impl Default for AzureOpenAISettings {
    fn default() -> Self {
        Self {
            deployment_name: String::new(),
            endpoint: String::new(),
            api_key: String::new(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }
}

impl AzureOpenAISettings {
    /// True when every connection field carries a value
    pub fn is_complete(&self) -> bool {
        !self.deployment_name.is_empty() && !self.endpoint.is_empty() && !self.api_key.is_empty()
    }

    /// Names of the variables that resolved to an empty string
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.deployment_name.is_empty() {
            missing.push(vars::AZURE_OPENAI_DEPLOYMENT_NAME);
        }
        if self.endpoint.is_empty() {
            missing.push(vars::AZURE_OPENAI_ENDPOINT);
        }
        if self.api_key.is_empty() {
            missing.push(vars::AZURE_OPENAI_API_KEY);
        }
        missing
    }
}

/// Process settings for a scenario run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Azure OpenAI connection
    pub azure: AzureOpenAISettings,
    /// Cache key for agent replies (empty = caching off)
    pub cache_key: String,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup
    ///
    /// ```
    /// use agent_utils::Settings;
    ///
    /// let settings = Settings::from_lookup(|key| match key {
    ///     "AZURE_OPENAI_DEPLOYMENT_NAME" => Some("gpt-4o".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(settings.azure.deployment_name, "gpt-4o");
    /// assert_eq!(settings.azure.api_key, "");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).unwrap_or_default();

        let api_version = lookup(vars::AZURE_OPENAI_API_VERSION)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string());

        Self {
            azure: AzureOpenAISettings {
                deployment_name: read(vars::AZURE_OPENAI_DEPLOYMENT_NAME),
                endpoint: read(vars::AZURE_OPENAI_ENDPOINT),
                api_key: read(vars::AZURE_OPENAI_API_KEY),
                api_version,
            },
            cache_key: read(vars::SCENARIO_CACHE_KEY),
        }
    }

    /// Replace the cache key
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    /// Model identifier routed to the configured Azure deployment
    pub fn default_model(&self) -> String {
        format!("azure/{}", self.azure.deployment_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_values_default_to_empty() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings.azure.deployment_name, "");
        assert_eq!(settings.azure.endpoint, "");
        assert_eq!(settings.azure.api_key, "");
        assert_eq!(settings.cache_key, "");
        assert_eq!(settings.azure.api_version, DEFAULT_AZURE_API_VERSION);
        assert!(!settings.azure.is_complete());
        assert_eq!(settings.azure.missing().len(), 3);
    }

    #[test]
    fn test_full_environment() {
        let settings = Settings::from_lookup(lookup(&[
            (vars::AZURE_OPENAI_DEPLOYMENT_NAME, "gpt-4o"),
            (vars::AZURE_OPENAI_ENDPOINT, "https://res.openai.azure.com"),
            (vars::AZURE_OPENAI_API_KEY, "secret"),
            (vars::AZURE_OPENAI_API_VERSION, "2025-01-01-preview"),
            (vars::SCENARIO_CACHE_KEY, "azure_aoai"),
        ]));

        assert!(settings.azure.is_complete());
        assert!(settings.azure.missing().is_empty());
        assert_eq!(settings.azure.api_version, "2025-01-01-preview");
        assert_eq!(settings.cache_key, "azure_aoai");
        assert_eq!(settings.default_model(), "azure/gpt-4o");
    }

    #[test]
    fn test_empty_api_version_uses_default() {
        let settings = Settings::from_lookup(lookup(&[(vars::AZURE_OPENAI_API_VERSION, "")]));
        assert_eq!(settings.azure.api_version, DEFAULT_AZURE_API_VERSION);
    }

    #[test]
    fn test_with_cache_key() {
        let settings = Settings::default().with_cache_key("run-1");
        assert_eq!(settings.cache_key, "run-1");
    }
}
