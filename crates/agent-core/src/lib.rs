//! Core abstractions for agent-scenario
//!
//! This crate defines the agent contract used by the scenario runner: the
//! [`Agent`] trait, the per-turn [`AgentInput`], conversation messages and
//! the shared error type.

pub mod agent;
pub mod error;
pub mod input;
pub mod message;

pub use agent::{Agent, AgentRole};
pub use error::{Error, Result};
pub use input::AgentInput;
pub use message::{AgentReply, ConversationMessage, Role};
