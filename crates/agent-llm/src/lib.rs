//! LLM provider abstraction layer for agent-scenario
//!
//! This crate provides provider-agnostic abstractions for talking to a
//! chat-completion service. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - Provider-qualified model ids (`azure/<deployment>`)
//! - The Azure OpenAI provider, and a scripted provider for tests (feature
//!   `scripted`)

pub mod completion;
pub mod error;
pub mod messages;
pub mod model;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use model::ModelId;
pub use provider::LLMProvider;
