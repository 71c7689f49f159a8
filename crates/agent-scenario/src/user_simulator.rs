//! Simulated user

use crate::config::ScenarioConfig;
use crate::error::Result;
use agent_core::{Agent, AgentInput, AgentReply, AgentRole, Role};
use agent_llm::providers::provider_for_model;
use agent_llm::{CompletionRequest, LLMProvider, Message};
use agent_prompt::JinjaTemplate;
use agent_utils::AzureOpenAISettings;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const SIMULATOR_PROMPT: &str = "You are pretending to be a user talking to an AI agent, in order to test it against a scenario.
Write the way a real person types into a chat box: short, lowercase, no greeting, one request at a time.

<scenario>
{{ description }}
</scenario>

You play the user. The agent's messages appear with the user role and your own earlier messages appear with the assistant role.
Reply with your next message only.";

const OPENING_CUE: &str = "Write your first message to the agent.";

#[derive(Serialize)]
struct SimulatorContext<'a> {
    description: &'a str,
}

/// Plays the human side of a scenario
///
/// The conversation is sent with roles flipped, so the model speaks as the
/// assistant while playing the user.
pub struct UserSimulatorAgent {
    provider: Arc<dyn LLMProvider>,
    model: String,
    template: JinjaTemplate,
}

impl UserSimulatorAgent {
    /// Create a simulator
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in prompt template fails to parse
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            provider,
            model: model.into(),
            template: JinjaTemplate::new("user_simulator", SIMULATOR_PROMPT)?,
        })
    }

    /// Create a simulator on the configuration's default model
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScenarioError::Configuration`] if the default model
    /// cannot be routed to a provider
    pub fn from_config(config: &ScenarioConfig, settings: &AzureOpenAISettings) -> Result<Self> {
        let model = config.model_id()?;
        let provider = provider_for_model(&model, settings)?;
        Self::new(provider, model.name)
    }

    fn flipped(input: &AgentInput) -> Vec<Message> {
        if input.messages.is_empty() {
            return vec![Message::user(OPENING_CUE)];
        }

        input
            .messages
            .iter()
            .map(|m| match m.role {
                Role::User => Message::assistant(&m.content),
                Role::Assistant => Message::user(&m.content),
            })
            .collect()
    }
}

#[async_trait]
impl Agent for UserSimulatorAgent {
    async fn call(&self, input: AgentInput) -> agent_core::Result<AgentReply> {
        let system = self
            .template
            .render(&SimulatorContext {
                description: &input.scenario_description,
            })
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

        let request = CompletionRequest::builder(&self.model)
            .system(system)
            .messages(Self::flipped(&input))
            .build();

        debug!(turn = input.turn, "Simulating user message");
        let response = self.provider.complete(request).await?;

        Ok(AgentReply::user(response.text().trim()))
    }

    fn name(&self) -> &str {
        "user_simulator"
    }

    fn role(&self) -> AgentRole {
        AgentRole::User
    }
}
