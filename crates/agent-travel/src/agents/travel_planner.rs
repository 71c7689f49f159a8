//! Travel planning specialist

use agent_core::{Agent, AgentInput, AgentReply, Result};
use agent_runtime::{BaseAgent, ServiceConnector};
use async_trait::async_trait;

/// Completion-service id of the travel planner
pub const SERVICE_ID: &str = "travel_service";

const SYSTEM_PROMPT: &str = "You are a travel planning expert. Help users plan trips including itinerary suggestions, budget calculations, and accommodation recommendations.";

/// Agent that plans itineraries, budgets and accommodation
pub struct TravelPlannerAgent {
    agent: BaseAgent,
}

impl TravelPlannerAgent {
    /// Create a new travel planner agent
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
impl Agent for TravelPlannerAgent {
    async fn call(&self, input: AgentInput) -> Result<AgentReply> {
        self.agent.call(input).await
    }

    fn name(&self) -> &str {
        self.agent.name()
    }
}
