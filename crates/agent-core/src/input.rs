//! Input handed to an agent on each turn

use crate::ConversationMessage;
use serde::{Deserialize, Serialize};

/// Everything an agent sees when it is asked for a reply
///
/// # Example
///
/// ```
/// use agent_core::{AgentInput, ConversationMessage};
///
/// let input = AgentInput::new("thread-1")
///     .with_description("User asks about weather in Paris.")
///     .with_messages(vec![ConversationMessage::user("weather in paris?")]);
///
/// assert_eq!(input.last_message_content(), Some("weather in paris?"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentInput {
    /// Conversation identifier, stable across turns of one run
    pub thread_id: String,

    /// Full conversation so far, oldest first
    pub messages: Vec<ConversationMessage>,

    /// Messages added since this agent last spoke
    pub new_messages: Vec<ConversationMessage>,

    /// Free-text description of what the simulated user wants
    pub scenario_description: String,

    /// 1-based turn number
    pub turn: usize,

    /// Set when the runner demands a final verdict from a judge
    pub judgment_request: bool,
}

impl AgentInput {
    /// Create an empty input for a thread
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            ..Self::default()
        }
    }

    /// Set the conversation
    pub fn with_messages(mut self, messages: Vec<ConversationMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the messages added since the agent's previous turn
    pub fn with_new_messages(mut self, messages: Vec<ConversationMessage>) -> Self {
        self.new_messages = messages;
        self
    }

    /// Set the scenario description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.scenario_description = description.into();
        self
    }

    /// Set the turn number
    pub fn with_turn(mut self, turn: usize) -> Self {
        self.turn = turn;
        self
    }

    /// Ask for a final judgment
    pub fn with_judgment_request(mut self, requested: bool) -> Self {
        self.judgment_request = requested;
        self
    }

    /// Content of the most recent message, if any
    pub fn last_message_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}
