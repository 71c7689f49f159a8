//! Coordinator between specialists

use agent_core::{Agent, AgentInput, AgentReply, Result};
use agent_runtime::{BaseAgent, ServiceConnector};
use async_trait::async_trait;

/// Completion-service id of the coordinator
pub const SERVICE_ID: &str = "coordinator_service";

const SYSTEM_PROMPT: &str = "You are a coordinator managing conversations between specialists. Route questions to appropriate agents and synthesize responses.";

/// Agent that routes questions and synthesizes specialist answers
///
/// Routing is only described to the model; no sub-agents are invoked.
pub struct CoordinatorAgent {
    agent: BaseAgent,
}

impl CoordinatorAgent {
    /// Create a new coordinator agent
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
impl Agent for CoordinatorAgent {
    async fn call(&self, input: AgentInput) -> Result<AgentReply> {
        self.agent.call(input).await
    }

    fn name(&self) -> &str {
        self.agent.name()
    }
}
