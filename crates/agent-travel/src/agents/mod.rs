//! Travel specialist agents
//!
//! Each agent is a [`BaseAgent`](agent_runtime::BaseAgent) with a fixed
//! service id and system prompt.

pub mod coordinator;
pub mod travel_planner;
pub mod weather;

pub use coordinator::CoordinatorAgent;
pub use travel_planner::TravelPlannerAgent;
pub use weather::WeatherAgent;

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{Agent, AgentInput, ConversationMessage};
    use agent_llm::LLMProvider;
    use agent_llm::providers::ScriptedProvider;
    use std::sync::Arc;

    fn scripted(reply: &str) -> (Arc<ScriptedProvider>, impl Fn(&str) -> agent_llm::Result<Arc<dyn LLMProvider>>) {
        let provider = Arc::new(ScriptedProvider::constant(reply));
        let shared = provider.clone();
        let connector = move |_: &str| -> agent_llm::Result<Arc<dyn LLMProvider>> { Ok(shared.clone()) };
        (provider, connector)
    }

    #[test]
    fn test_service_ids() {
        let (_, connector) = scripted("ok");
        assert_eq!(WeatherAgent::new(&connector).unwrap().name(), "weather_service");
        assert_eq!(TravelPlannerAgent::new(&connector).unwrap().name(), "travel_service");
        assert_eq!(CoordinatorAgent::new(&connector).unwrap().name(), "coordinator_service");
    }

    #[test]
    fn test_prompts_differ_only_by_instruction() {
        let (_, connector) = scripted("ok");
        let weather = WeatherAgent::new(&connector).unwrap();
        let planner = TravelPlannerAgent::new(&connector).unwrap();
        let coordinator = CoordinatorAgent::new(&connector).unwrap();

        assert!(weather.base().system_prompt().starts_with("You are a weather expert."));
        assert!(planner.base().system_prompt().contains("budget calculations"));
        assert!(coordinator.base().system_prompt().contains("Route questions"));
    }

    #[tokio::test]
    async fn test_weather_agent_prompt() {
        let (provider, connector) = scripted("Paris: 8C, light rain. Bring an umbrella.");
        let agent = WeatherAgent::new(&connector).unwrap();

        let input = AgentInput::new("t").with_messages(vec![ConversationMessage::user("weather in paris")]);
        let reply = agent.call(input).await.unwrap();
        assert_eq!(reply.content, "Paris: 8C, light rain. Bring an umbrella.");

        let request = &provider.requests()[0];
        assert_eq!(
            request.messages[0].content,
            "You are a weather expert. Provide accurate weather information and forecasts with temperature, conditions, and recommendations.\n\nUser: weather in paris"
        );
    }
}
