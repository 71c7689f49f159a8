//! Agent runtime: completion-service kernel and the base agent
//!
//! A [`Kernel`] holds named completion-service connections and invokes
//! prompts against them. [`BaseAgent`] pairs a kernel with a fixed system
//! prompt and implements [`agent_core::Agent`].

pub mod agents;
pub mod kernel;

// Re-export key types
pub use agents::BaseAgent;
pub use kernel::{AzureConnector, Kernel, KernelBuilder, KernelConfig, ServiceConnector};
