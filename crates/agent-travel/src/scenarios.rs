//! The travel scenario suite
//!
//! Every scenario puts the weather agent in front of a simulated user; they
//! differ in what the user wants and how many turns they get.

use crate::agents::weather;
use crate::context::SuiteContext;
use crate::inspect::{check_multi_agent_response, inspect_result};
use agent_scenario::{Scenario, ScenarioError, ScenarioResult};
use std::fmt;

/// One of the travel scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelScenario {
    /// Weather question for Paris
    Simple,
    /// Tokyo business trip with weather and budget
    Dynamic,
    /// Weekend trip to Paris in December
    MultiAgent,
}

impl TravelScenario {
    /// All scenarios in run order
    pub const ALL: [Self; 3] = [Self::Simple, Self::Dynamic, Self::MultiAgent];

    /// Scenario name
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple agent test",
            Self::Dynamic => "dynamic agent selection",
            Self::MultiAgent => "multi-agent travel planning",
        }
    }

    /// What the simulated user is after
    pub fn description(self) -> &'static str {
        match self {
            Self::Simple => "User asks about weather in Paris.",
            Self::Dynamic => {
                "User asks about Tokyo business trip with weather and budget considerations."
            }
            Self::MultiAgent => "The user wants to plan a weekend trip to Paris in December.",
        }
    }

    /// Turn limit
    pub fn max_turns(self) -> usize {
        match self {
            Self::Simple | Self::MultiAgent => 3,
            Self::Dynamic => 2,
        }
    }

    /// Build the scenario with fresh agents from `ctx`
    pub fn build(self, ctx: &SuiteContext) -> Result<Scenario, ScenarioError> {
        let weather = ctx
            .weather_agent()
            .map_err(|e| ScenarioError::agent(weather::SERVICE_ID, e))?;

        Scenario::builder(self.name())
            .description(self.description())
            .agent(weather)
            .agent(ctx.user_simulator()?)
            .max_turns(self.max_turns())
            .build()
    }

    /// Build, run and inspect the scenario
    pub async fn run(self, ctx: &SuiteContext) -> Result<ScenarioResult, ScenarioError> {
        let scenario = self.build(ctx)?;
        let result = ctx.runner().run(&scenario).await?;

        inspect_result(self.name(), &result);
        if self == Self::MultiAgent {
            check_multi_agent_response(&result);
        }

        Ok(result)
    }
}

impl fmt::Display for TravelScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weather agent answers a Paris weather question
pub async fn simple_agent_interaction(ctx: &SuiteContext) -> Result<ScenarioResult, ScenarioError> {
    TravelScenario::Simple.run(ctx).await
}

/// Weather agent handles a Tokyo business trip with a budget angle
pub async fn dynamic_agent_selection(ctx: &SuiteContext) -> Result<ScenarioResult, ScenarioError> {
    TravelScenario::Dynamic.run(ctx).await
}

/// Weather agent helps plan a December weekend in Paris
pub async fn multi_agent_simulation(ctx: &SuiteContext) -> Result<ScenarioResult, ScenarioError> {
    TravelScenario::MultiAgent.run(ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_table() {
        assert_eq!(TravelScenario::ALL.len(), 3);
        assert_eq!(TravelScenario::Simple.max_turns(), 3);
        assert_eq!(TravelScenario::Dynamic.max_turns(), 2);
        assert_eq!(TravelScenario::MultiAgent.max_turns(), 3);
        assert_eq!(TravelScenario::Dynamic.to_string(), "dynamic agent selection");
        assert!(TravelScenario::MultiAgent.description().contains("December"));
    }
}
