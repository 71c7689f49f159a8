//! Scenario definition and builder

use crate::config::DEFAULT_MAX_TURNS;
use crate::error::{Result, ScenarioError};
use agent_core::{Agent, AgentRole};
use std::sync::Arc;

/// A simulated conversation test: who talks, about what, for how long
///
/// The roster holds exactly one user simulator, at least one agent under
/// test and at most one judge. [`ScenarioBuilder::build`] rejects anything
/// else.
///
/// # Example
///
/// ```no_run
/// use agent_scenario::{Scenario, UserSimulatorAgent};
/// use std::sync::Arc;
///
/// # fn example(weather: Arc<dyn agent_core::Agent>, simulator: UserSimulatorAgent) -> agent_scenario::Result<()> {
/// let scenario = Scenario::builder("simple agent test")
///     .description("User asks about weather in Paris.")
///     .agent(weather)
///     .agent(Arc::new(simulator))
///     .max_turns(3)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Scenario {
    name: String,
    description: String,
    agents: Vec<Arc<dyn Agent>>,
    user_index: usize,
    max_turns: usize,
}

impl Scenario {
    /// Create a new scenario builder
    pub fn builder(name: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder::new(name)
    }

    /// Scenario name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the simulated user is trying to do
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Turn limit
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// The whole roster, in registration order
    pub fn agents(&self) -> &[Arc<dyn Agent>] {
        &self.agents
    }

    /// The user simulator
    pub fn user_simulator(&self) -> &Arc<dyn Agent> {
        &self.agents[self.user_index]
    }

    /// Agents under test, in roster order
    pub fn agents_under_test(&self) -> impl Iterator<Item = &Arc<dyn Agent>> {
        self.agents.iter().filter(|a| a.role() == AgentRole::Agent)
    }

    /// The judge, if the roster has one
    pub fn judge(&self) -> Option<&Arc<dyn Agent>> {
        self.agents.iter().find(|a| a.role() == AgentRole::Judge)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("agents", &self.agents.iter().map(|a| a.name()).collect::<Vec<_>>())
            .field("max_turns", &self.max_turns)
            .finish()
    }
}

/// Builder for constructing scenarios
pub struct ScenarioBuilder {
    name: String,
    description: String,
    agents: Vec<Arc<dyn Agent>>,
    max_turns: usize,
}

impl ScenarioBuilder {
    /// Create a new scenario builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            agents: Vec::new(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Set the description handed to the simulator and judge
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a participant; its [`Agent::role`] decides where it plays
    pub fn agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agents.push(agent);
        self
    }

    /// Add several participants
    pub fn agents(mut self, agents: impl IntoIterator<Item = Arc<dyn Agent>>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Set the turn limit
    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Validate the roster and build the scenario
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidScenario`] unless the roster has
    /// exactly one user simulator, at least one agent under test, at most
    /// one judge, and `max_turns >= 1`
    pub fn build(self) -> Result<Scenario> {
        let count = |role: AgentRole| self.agents.iter().filter(|a| a.role() == role).count();

        let users = count(AgentRole::User);
        let user_index = match self.agents.iter().position(|a| a.role() == AgentRole::User) {
            Some(index) if users == 1 => index,
            _ => {
                return Err(ScenarioError::InvalidScenario(format!(
                    "'{}' needs exactly one user simulator, found {users}",
                    self.name
                )));
            }
        };
        if count(AgentRole::Agent) == 0 {
            return Err(ScenarioError::InvalidScenario(format!(
                "'{}' has no agent under test",
                self.name
            )));
        }
        let judges = count(AgentRole::Judge);
        if judges > 1 {
            return Err(ScenarioError::InvalidScenario(format!(
                "'{}' allows at most one judge, found {judges}",
                self.name
            )));
        }
        if self.max_turns == 0 {
            return Err(ScenarioError::InvalidScenario(format!(
                "'{}' must allow at least one turn",
                self.name
            )));
        }

        Ok(Scenario {
            name: self.name,
            description: self.description,
            agents: self.agents,
            user_index,
            max_turns: self.max_turns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentInput, AgentReply};
    use async_trait::async_trait;

    struct Stub(&'static str, AgentRole);

    #[async_trait]
    impl Agent for Stub {
        async fn call(&self, _input: AgentInput) -> agent_core::Result<AgentReply> {
            Ok(AgentReply::assistant(self.0))
        }

        fn name(&self) -> &str {
            self.0
        }

        fn role(&self) -> AgentRole {
            self.1
        }
    }

    fn stub(name: &'static str, role: AgentRole) -> Arc<dyn Agent> {
        Arc::new(Stub(name, role))
    }

    #[test]
    fn test_valid_roster() {
        let scenario = Scenario::builder("s")
            .description("d")
            .agent(stub("weather", AgentRole::Agent))
            .agent(stub("user", AgentRole::User))
            .agent(stub("judge", AgentRole::Judge))
            .max_turns(3)
            .build()
            .unwrap();

        assert_eq!(scenario.name(), "s");
        assert_eq!(scenario.description(), "d");
        assert_eq!(scenario.max_turns(), 3);
        assert_eq!(scenario.user_simulator().name(), "user");
        assert_eq!(scenario.agents_under_test().count(), 1);
        assert_eq!(scenario.judge().map(|j| j.name()), Some("judge"));
    }

    #[test]
    fn test_default_max_turns() {
        let scenario = Scenario::builder("s")
            .agents([stub("a", AgentRole::Agent), stub("u", AgentRole::User)])
            .build()
            .unwrap();
        assert_eq!(scenario.max_turns(), DEFAULT_MAX_TURNS);
        assert!(scenario.judge().is_none());
    }

    #[test]
    fn test_missing_user_simulator() {
        let result = Scenario::builder("s")
            .agent(stub("a", AgentRole::Agent))
            .build();
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }

    #[test]
    fn test_two_user_simulators() {
        let result = Scenario::builder("s")
            .agent(stub("a", AgentRole::Agent))
            .agent(stub("u1", AgentRole::User))
            .agent(stub("u2", AgentRole::User))
            .build();
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }

    #[test]
    fn test_no_agent_under_test() {
        let result = Scenario::builder("s")
            .agent(stub("u", AgentRole::User))
            .build();
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }

    #[test]
    fn test_two_judges() {
        let result = Scenario::builder("s")
            .agent(stub("a", AgentRole::Agent))
            .agent(stub("u", AgentRole::User))
            .agent(stub("j1", AgentRole::Judge))
            .agent(stub("j2", AgentRole::Judge))
            .build();
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }

    #[test]
    fn test_zero_turns() {
        let result = Scenario::builder("s")
            .agent(stub("a", AgentRole::Agent))
            .agent(stub("u", AgentRole::User))
            .max_turns(0)
            .build();
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }
}
