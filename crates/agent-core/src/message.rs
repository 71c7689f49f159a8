//! Conversation messages exchanged between a scenario and its agents

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The (simulated) user
    User,
    /// An agent reply
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One entry of a scenario conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Author
    pub role: Role,
    /// Text content
    pub content: String,
}

impl ConversationMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Reply returned by [`Agent::call`](crate::Agent::call)
///
/// Agents under test always answer as `assistant`; only the user simulator
/// answers as `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    /// Author of the reply
    pub role: Role,
    /// Reply text
    pub content: String,
}

impl AgentReply {
    /// Reply authored by an agent
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Reply authored by the simulated user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

impl From<AgentReply> for ConversationMessage {
    fn from(reply: AgentReply) -> Self {
        Self {
            role: reply.role,
            content: reply.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ConversationMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);

        let msg: ConversationMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert_eq!(msg, ConversationMessage::assistant("hello"));
    }

    #[test]
    fn test_reply_into_message() {
        let msg: ConversationMessage = AgentReply::assistant("sunny").into();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "sunny");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
