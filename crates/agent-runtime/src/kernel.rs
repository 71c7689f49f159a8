//! Kernel: the per-agent registry of completion-service connections
//!
//! A [`Kernel`] owns one or more named [`LLMProvider`] connections and turns
//! a single prompt string into a completion. Connections are created through
//! a [`ServiceConnector`], so the same agent code runs against Azure OpenAI
//! in production and a scripted provider in tests.

use agent_core::{Error, Result};
use agent_llm::providers::AzureOpenAIProvider;
use agent_llm::{CompletionRequest, LLMProvider, Message};
use agent_utils::AzureOpenAISettings;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Creates a completion-service connection for a service id
pub trait ServiceConnector: Send + Sync {
    /// Open a connection registered under `service_id`
    fn connect(&self, service_id: &str) -> agent_llm::Result<Arc<dyn LLMProvider>>;

    /// Model identifier sent with each request
    fn model(&self) -> String {
        String::new()
    }
}

impl<F> ServiceConnector for F
where
    F: Fn(&str) -> agent_llm::Result<Arc<dyn LLMProvider>> + Send + Sync,
{
    fn connect(&self, service_id: &str) -> agent_llm::Result<Arc<dyn LLMProvider>> {
        self(service_id)
    }
}

/// Connects every service to the configured Azure OpenAI deployment
#[derive(Debug, Clone)]
pub struct AzureConnector {
    settings: AzureOpenAISettings,
}

impl AzureConnector {
    /// Create a connector for the given settings
    pub fn new(settings: AzureOpenAISettings) -> Self {
        Self { settings }
    }
}

impl ServiceConnector for AzureConnector {
    fn connect(&self, service_id: &str) -> agent_llm::Result<Arc<dyn LLMProvider>> {
        debug!(service_id, deployment = %self.settings.deployment_name, "Connecting to Azure OpenAI");
        Ok(Arc::new(AzureOpenAIProvider::from_settings(&self.settings)?))
    }

    fn model(&self) -> String {
        self.settings.deployment_name.clone()
    }
}

/// Request parameters applied to every prompt invocation
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Model identifier (the deployment name for Azure)
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature; `None` leaves the service default
    pub temperature: Option<f32>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            max_tokens: 1024,
            temperature: None,
        }
    }
}

/// Named completion-service connections plus prompt invocation
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AzureConnector, Kernel, ServiceConnector};
/// use agent_utils::Settings;
///
/// # async fn example() -> agent_core::Result<()> {
/// let connector = AzureConnector::new(Settings::from_env().azure);
/// let kernel = Kernel::builder()
///     .connect("weather_service", &connector)?
///     .model(connector.model())
///     .build()?;
///
/// let text = kernel.invoke_prompt("Say hello").await?;
/// # Ok(())
/// # }
/// ```
pub struct Kernel {
    services: HashMap<String, Arc<dyn LLMProvider>>,
    default_service: String,
    config: KernelConfig,
}

impl Kernel {
    /// Create a new kernel builder
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// Get a registered connection
    pub fn service(&self, service_id: &str) -> Option<&Arc<dyn LLMProvider>> {
        self.services.get(service_id)
    }

    /// Ids of all registered connections
    pub fn service_ids(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Id of the connection used by [`Kernel::invoke_prompt`]
    pub fn default_service(&self) -> &str {
        &self.default_service
    }

    /// Get the request configuration
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Send `prompt` as a single user message on the default connection
    pub async fn invoke_prompt(&self, prompt: &str) -> Result<String> {
        self.invoke_prompt_on(&self.default_service, prompt).await
    }

    /// Send `prompt` as a single user message on a named connection
    ///
    /// Provider failures are returned as-is; nothing is retried.
    pub async fn invoke_prompt_on(&self, service_id: &str, prompt: &str) -> Result<String> {
        let provider = self.services.get(service_id).ok_or_else(|| {
            Error::Configuration(format!(
                "Service '{}' not registered. Available services: {:?}",
                service_id,
                self.service_ids()
            ))
        })?;

        let mut builder = CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(prompt))
            .max_tokens(self.config.max_tokens);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }

        debug!(service_id, prompt_len = prompt.len(), "Invoking prompt");
        let response = provider.complete(builder.build()).await?;

        Ok(response.message.content)
    }
}

/// Builder for Kernel
pub struct KernelBuilder {
    services: HashMap<String, Arc<dyn LLMProvider>>,
    default_service: Option<String>,
    config: KernelConfig,
}

impl KernelBuilder {
    /// Create a new kernel builder
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
            default_service: None,
            config: KernelConfig::default(),
        }
    }

    /// Register a connection; the first one becomes the default
    pub fn service(mut self, service_id: impl Into<String>, provider: Arc<dyn LLMProvider>) -> Self {
        let service_id = service_id.into();
        if self.default_service.is_none() {
            self.default_service = Some(service_id.clone());
        }
        self.services.insert(service_id, provider);
        self
    }

    /// Open a connection through `connector` and register it
    ///
    /// # Errors
    ///
    /// Returns an error if the connector cannot create the connection
    pub fn connect(self, service_id: impl Into<String>, connector: &dyn ServiceConnector) -> Result<Self> {
        let service_id = service_id.into();
        let provider = connector.connect(&service_id)?;
        Ok(self.service(service_id, provider))
    }

    /// Set the request configuration
    pub fn config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the kernel
    ///
    /// # Errors
    ///
    /// Returns an error if no connection was registered
    pub fn build(self) -> Result<Kernel> {
        let default_service = self.default_service.ok_or_else(|| {
            Error::InitializationFailed("Kernel has no completion service".to_string())
        })?;

        Ok(Kernel {
            services: self.services,
            default_service,
            config: self.config,
        })
    }
}

impl Default for KernelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
