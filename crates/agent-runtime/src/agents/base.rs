//! Base agent: one system prompt, one completion service

use crate::kernel::{AzureConnector, Kernel, ServiceConnector};
use agent_core::{Agent, AgentInput, AgentReply, Result};
use agent_prompt::PromptBuilder;
use agent_utils::AzureOpenAISettings;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// An agent that answers the latest message under a fixed system prompt
///
/// Only the content of the most recent message reaches the model; earlier
/// turns are not replayed. The prompt sent is
/// `"{system_prompt}\n\nUser: {last message}"`.
///
/// # Example
///
/// ```no_run
/// use agent_core::{Agent, AgentInput, ConversationMessage};
/// use agent_runtime::BaseAgent;
/// use agent_utils::Settings;
///
/// # async fn example() -> agent_core::Result<()> {
/// let settings = Settings::from_env();
/// let agent = BaseAgent::azure("weather_service", "You are a weather expert.", &settings.azure)?;
///
/// let input = AgentInput::new("thread-1")
///     .with_messages(vec![ConversationMessage::user("Weather in Paris?")]);
/// let reply = agent.call(input).await?;
/// println!("{}", reply.content);
/// # Ok(())
/// # }
/// ```
pub struct BaseAgent {
    service_id: String,
    system_prompt: String,
    kernel: Kernel,
}

impl BaseAgent {
    /// Create an agent, opening its completion service through `connector`
    ///
    /// # Arguments
    ///
    /// * `service_id` - Id the connection is registered under; also the agent name
    /// * `system_prompt` - Instruction prepended to every prompt
    /// * `connector` - Factory for the completion-service connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connector cannot create the connection
    pub fn new(
        service_id: impl Into<String>,
        system_prompt: impl Into<String>,
        connector: &dyn ServiceConnector,
    ) -> Result<Self> {
        let service_id = service_id.into();
        let kernel = Kernel::builder()
            .connect(service_id.clone(), connector)?
            .model(connector.model())
            .build()?;

        Ok(Self {
            service_id,
            system_prompt: system_prompt.into(),
            kernel,
        })
    }

    /// Create an agent backed by Azure OpenAI
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be used to build a client
    pub fn azure(
        service_id: impl Into<String>,
        system_prompt: impl Into<String>,
        settings: &AzureOpenAISettings,
    ) -> Result<Self> {
        Self::new(service_id, system_prompt, &AzureConnector::new(settings.clone()))
    }

    /// Id of the completion service
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// The fixed system prompt
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// The kernel holding this agent's connection
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Prompt text for `input`
    pub fn build_prompt(&self, input: &AgentInput) -> String {
        PromptBuilder::new()
            .text(&self.system_prompt)
            .blank_line()
            .labeled("User", input.last_message_content().unwrap_or_default())
            .build()
    }
}

#[async_trait]
impl Agent for BaseAgent {
    #[instrument(skip_all, fields(agent = %self.service_id, turn = input.turn))]
    async fn call(&self, input: AgentInput) -> Result<AgentReply> {
        let prompt = self.build_prompt(&input);
        debug!(history = input.messages.len(), "Sending latest message");

        let text = self.kernel.invoke_prompt(&prompt).await?;

        Ok(AgentReply::assistant(text))
    }

    fn name(&self) -> &str {
        &self.service_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{ConversationMessage, Error, Role};
    use agent_llm::{
        CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason,
        TokenUsage,
    };
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        pub Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse>;
            fn name(&self) -> &str;
        }
    }

    const SYSTEM: &str = "You are a weather expert.";

    fn response(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn agent_with(mock: MockProvider) -> BaseAgent {
        let provider: Arc<dyn LLMProvider> = Arc::new(mock);
        let connector = move |_: &str| -> agent_llm::Result<Arc<dyn LLMProvider>> {
            Ok(provider.clone())
        };
        BaseAgent::new("weather_service", SYSTEM, &connector).unwrap()
    }

    #[tokio::test]
    async fn test_only_last_message_is_sent() {
        let mut mock = MockProvider::new();
        mock.expect_complete()
            .withf(|req| {
                req.messages.len() == 1
                    && req.messages[0].content
                        == "You are a weather expert.\n\nUser: And tomorrow in Tokyo?"
            })
            .times(1)
            .returning(|_| Ok(response("Cloudy, 14C")));

        let agent = agent_with(mock);
        let input = AgentInput::new("t").with_messages(vec![
            ConversationMessage::user("Weather in Paris?"),
            ConversationMessage::assistant("Rainy."),
            ConversationMessage::user("And tomorrow in Tokyo?"),
        ]);

        let reply = agent.call(input).await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Cloudy, 14C");
    }

    #[tokio::test]
    async fn test_empty_conversation_sends_empty_user_line() {
        let mut mock = MockProvider::new();
        mock.expect_complete()
            .withf(|req| req.messages[0].content == "You are a weather expert.\n\nUser: ")
            .times(1)
            .returning(|_| Ok(response("How can I help?")));

        let agent = agent_with(mock);
        let reply = agent.call(AgentInput::new("t")).await.unwrap();
        assert_eq!(reply, AgentReply::assistant("How can I help?"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut mock = MockProvider::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Err(LLMError::AuthenticationFailed));

        let agent = agent_with(mock);
        let input = AgentInput::new("t").with_messages(vec![ConversationMessage::user("hi")]);

        let err = agent.call(input).await.unwrap_err();
        assert!(err.is_completion());
        assert!(matches!(err, Error::Completion(_)));
    }

    #[test]
    fn test_connector_called_once_with_service_id() {
        let calls = std::sync::Mutex::new(Vec::new());
        let connector = |service_id: &str| -> agent_llm::Result<Arc<dyn LLMProvider>> {
            calls.lock().unwrap().push(service_id.to_string());
            Ok(Arc::new(MockProvider::new()))
        };

        let agent = BaseAgent::new("travel_service", "Plan trips.", &connector).unwrap();
        assert_eq!(agent.name(), "travel_service");
        assert_eq!(agent.system_prompt(), "Plan trips.");
        assert_eq!(agent.kernel().default_service(), "travel_service");
        assert_eq!(*calls.lock().unwrap(), vec!["travel_service".to_string()]);
    }

    #[test]
    fn test_connector_failure_fails_construction() {
        let connector = |_: &str| -> agent_llm::Result<Arc<dyn LLMProvider>> {
            Err(LLMError::ConfigurationError("bad endpoint".to_string()))
        };

        let result = BaseAgent::new("weather_service", SYSTEM, &connector);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
