//! Weather specialist

use agent_core::{Agent, AgentInput, AgentReply, Result};
use agent_runtime::{BaseAgent, ServiceConnector};
use async_trait::async_trait;

/// Completion-service id of the weather agent
pub const SERVICE_ID: &str = "weather_service";

const SYSTEM_PROMPT: &str = "You are a weather expert. Provide accurate weather information and forecasts with temperature, conditions, and recommendations.";

/// Agent that answers weather questions
pub struct WeatherAgent {
    agent: BaseAgent,
}

impl WeatherAgent {
    /// Create a new weather agent
    pub fn new(connector: &dyn ServiceConnector) -> Result<Self> {
        Ok(Self {
            agent: BaseAgent::new(SERVICE_ID, SYSTEM_PROMPT, connector)?,
        })
    }

    /// The underlying base agent
    pub fn base(&self) -> &BaseAgent {
        &self.agent
    }
}

#[async_trait]
impl Agent for WeatherAgent {
    async fn call(&self, input: AgentInput) -> Result<AgentReply> {
        self.agent.call(input).await
    }

    fn name(&self) -> &str {
        self.agent.name()
    }
}
