//! Azure OpenAI provider implementation
//!
//! This module implements the LLMProvider trait for chat deployments hosted
//! on Azure OpenAI.
//! See: https://learn.microsoft.com/azure/ai-services/openai/reference
//!
//! # Example
//!
//! ```no_run
//! use agent_llm::{CompletionRequest, LLMProvider, Message};
//! use agent_llm::providers::{AzureOpenAIConfig, AzureOpenAIProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AzureOpenAIConfig::new(
//!         "https://my-resource.openai.azure.com",
//!         "gpt-4o",
//!         "azure-api-key",
//!     )
//!     .with_timeout(60);
//!
//!     let provider = AzureOpenAIProvider::with_config(config)?;
//!
//!     let request = CompletionRequest::builder("gpt-4o")
//!         .add_message(Message::user("What's the weather in Paris?"))
//!         .max_tokens(200)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, StopReason,
    TokenUsage,
};
use agent_utils::AzureOpenAISettings;
use agent_utils::config::DEFAULT_AZURE_API_VERSION;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Azure OpenAI provider
#[derive(Debug, Clone)]
pub struct AzureOpenAIConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,

    /// Chat deployment name
    pub deployment: String,

    /// API key sent in the `api-key` header
    pub api_key: String,

    /// REST API version
    pub api_version: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl AzureOpenAIConfig {
    /// Create a new config with default API version and timeout
    pub fn new(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from loaded settings
    ///
    /// Empty values are accepted as-is.
    pub fn from_settings(settings: &AzureOpenAISettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            deployment: settings.deployment_name.clone(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Target a different deployment on the same resource
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    /// Set the REST API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Chat-completions URL for this deployment
    ///
    /// Fails with a configuration error when the endpoint is not a URL,
    /// which is how an unset `AZURE_OPENAI_ENDPOINT` shows up.
    pub fn chat_completions_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            LLMError::ConfigurationError(format!(
                "Invalid Azure OpenAI endpoint '{}': {e}",
                self.endpoint
            ))
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                LLMError::ConfigurationError(format!(
                    "Azure OpenAI endpoint '{}' cannot be a base URL",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .extend([
                "openai",
                "deployments",
                self.deployment.as_str(),
                "chat",
                "completions",
            ]);

        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);

        Ok(url)
    }
}

/// Azure OpenAI chat-completion provider
pub struct AzureOpenAIProvider {
    client: Client,
    config: AzureOpenAIConfig,
}

impl AzureOpenAIProvider {
    /// Create a new provider with custom configuration
    pub fn with_config(config: AzureOpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider from loaded settings
    pub fn from_settings(settings: &AzureOpenAISettings) -> Result<Self> {
        Self::with_config(AzureOpenAIConfig::from_settings(settings))
    }

    /// Get the current configuration
    pub fn config(&self) -> &AzureOpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for AzureOpenAIProvider {
    #[instrument(skip(self, request), fields(deployment = %self.config.deployment))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = self.config.chat_completions_url()?;
        debug!("Sending request to Azure OpenAI at {}", url);

        let azure_request = AzureRequest {
            messages: build_azure_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stop: request.stop_sequences,
        };

        let response = self
            .client
            .post(url)
            .header("api-key", &self.config.api_key)
            .json(&azure_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::DeploymentNotFound(self.config.deployment.clone()),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let body = response.text().await?;
        parse_azure_response(&body)
    }

    fn name(&self) -> &'static str {
        "azure-openai"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct AzureRequest {
    messages: Vec<AzureMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct AzureMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    #[serde(default)]
    choices: Vec<AzureChoice>,
    usage: Option<AzureUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    message: AzureResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// System prompt goes first in the messages array
fn build_azure_messages(system: Option<String>, messages: Vec<Message>) -> Vec<AzureMessage> {
    system
        .map(Message::system)
        .into_iter()
        .chain(messages)
        .map(|msg| AzureMessage {
            role: msg.role.as_str(),
            content: msg.content,
        })
        .collect()
}

fn parse_azure_response(body: &str) -> Result<CompletionResponse> {
    let response: AzureResponse = serde_json::from_str(body)
        .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

    let usage = response
        .usage
        .map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    let stop_reason = map_stop_reason(choice.finish_reason.as_deref());

    debug!(
        "Received response - stop_reason: {:?}, tokens: {}/{}",
        stop_reason, usage.input_tokens, usage.output_tokens
    );

    Ok(CompletionResponse {
        message: Message::assistant(choice.message.content.unwrap_or_default()),
        stop_reason,
        usage,
    })
}

fn map_stop_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("length") => StopReason::MaxTokens,
        Some("content_filter") => {
            debug!("Content filtered by Azure OpenAI safety systems");
            StopReason::ContentFilter
        }
        Some("stop") | None => StopReason::EndTurn,
        Some(other) => {
            debug!("Unknown stop reason: {}", other);
            StopReason::EndTurn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AzureOpenAIConfig {
        AzureOpenAIConfig::new("https://res.openai.azure.com/", "gpt-4o", "key")
    }

    #[test]
    fn test_provider_creation() {
        let provider = AzureOpenAIProvider::with_config(config()).unwrap();
        assert_eq!(provider.name(), "azure-openai");
        assert_eq!(provider.config().deployment, "gpt-4o");
        assert_eq!(provider.config().timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_config_from_settings() {
        let settings = AzureOpenAISettings {
            deployment_name: "chat".to_string(),
            endpoint: "https://res.openai.azure.com".to_string(),
            api_key: "secret".to_string(),
            api_version: "2025-01-01-preview".to_string(),
        };
        let config = AzureOpenAIConfig::from_settings(&settings).with_timeout(30);

        assert_eq!(config.deployment, "chat");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_version, "2025-01-01-preview");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_chat_completions_url() {
        let url = config().chat_completions_url().unwrap();
        assert_eq!(
            url.as_str(),
            format!(
                "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version={DEFAULT_AZURE_API_VERSION}"
            )
        );
    }

    #[test]
    fn test_url_encodes_deployment() {
        let url = config()
            .with_deployment("my deployment")
            .chat_completions_url()
            .unwrap();
        assert!(url.path().contains("my%20deployment"));
    }

    #[test]
    fn test_empty_endpoint_is_configuration_error() {
        let settings = AzureOpenAISettings::default();
        let result = AzureOpenAIConfig::from_settings(&settings).chat_completions_url();
        assert!(matches!(result, Err(LLMError::ConfigurationError(_))));
    }

    #[test]
    fn test_system_message_first() {
        let messages = build_azure_messages(
            Some("You are helpful".to_string()),
            vec![Message::user("Hi")],
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are helpful");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_request_serialization_skips_unset_fields() {
        let request = AzureRequest {
            messages: build_azure_messages(None, vec![Message::user("Hi")]),
            max_tokens: 64,
            temperature: None,
            stop: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 64);
        assert!(json.get("temperature").is_none());
        assert!(json.get("stop").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Paris: 8°C, light rain."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 42, "completion_tokens": 9, "total_tokens": 51}
        }"#;

        let response = parse_azure_response(body).unwrap();
        assert_eq!(response.text(), "Paris: 8°C, light rain.");
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.total(), 51);
    }

    #[test]
    fn test_parse_response_with_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"content_filter"}]}"#;
        let response = parse_azure_response(body).unwrap();
        assert_eq!(response.text(), "");
        assert_eq!(response.stop_reason, StopReason::ContentFilter);
        assert_eq!(response.usage, TokenUsage::default());
    }

    #[test]
    fn test_parse_response_without_choices() {
        let result = parse_azure_response(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(LLMError::UnexpectedResponse(_))));

        let result = parse_azure_response("not json");
        assert!(matches!(result, Err(LLMError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(map_stop_reason(Some("stop")), StopReason::EndTurn);
        assert_eq!(map_stop_reason(Some("length")), StopReason::MaxTokens);
        assert_eq!(map_stop_reason(Some("content_filter")), StopReason::ContentFilter);
        assert_eq!(map_stop_reason(Some("unknown")), StopReason::EndTurn);
        assert_eq!(map_stop_reason(None), StopReason::EndTurn);
    }
}
