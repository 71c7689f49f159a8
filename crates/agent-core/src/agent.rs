//! Core Agent trait definition

use crate::{AgentInput, AgentReply, Result};
use async_trait::async_trait;

/// The part an agent plays in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    /// Plays the human side of the conversation
    User,
    /// Agent under test
    Agent,
    /// Watches the conversation and decides whether it succeeded
    Judge,
}

/// Core trait that all agents must implement
///
/// The scenario runner feeds each agent the accumulated conversation and
/// appends whatever it returns.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Produce the next reply for the conversation in `input`
    async fn call(&self, input: AgentInput) -> Result<AgentReply>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// Role in a scenario roster (agents under test by default)
    fn role(&self) -> AgentRole {
        AgentRole::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversationMessage;

    struct Echo;

    #[async_trait]
    impl Agent for Echo {
        async fn call(&self, input: AgentInput) -> Result<AgentReply> {
            Ok(AgentReply::assistant(
                input.last_message_content().unwrap_or_default(),
            ))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_default_role_is_agent() {
        assert_eq!(Echo.role(), AgentRole::Agent);
    }

    #[test]
    fn test_call_through_trait_object() {
        let agent: Box<dyn Agent> = Box::new(Echo);
        let input = AgentInput::new("t").with_messages(vec![ConversationMessage::user("ping")]);

        let reply = tokio_test::block_on(agent.call(input)).unwrap();
        assert_eq!(reply, AgentReply::assistant("ping"));
        assert_eq!(agent.name(), "echo");
    }
}
