//! Error types for scenario runs

use thiserror::Error;

/// Scenario definition and execution errors
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario roster or limits are unusable
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// A model id or provider could not be set up
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An agent failed during its turn
    #[error("Agent '{agent}' failed: {source}")]
    Agent {
        agent: String,
        #[source]
        source: agent_core::Error,
    },

    /// Judge output did not contain a usable verdict
    #[error("Judgment error: {0}")]
    Judgment(String),

    /// A prompt template failed to render
    #[error(transparent)]
    Prompt(#[from] agent_prompt::PromptError),
}

impl ScenarioError {
    /// Wrap an agent failure with the agent's name
    pub fn agent(agent: impl Into<String>, source: agent_core::Error) -> Self {
        Self::Agent {
            agent: agent.into(),
            source,
        }
    }
}

/// Result type alias for scenario operations
pub type Result<T> = std::result::Result<T, ScenarioError>;

impl From<agent_llm::LLMError> for ScenarioError {
    fn from(err: agent_llm::LLMError) -> Self {
        ScenarioError::Configuration(err.to_string())
    }
}
