//! Shared utilities for the agent-scenario workspace
//!
//! This crate provides settings loading and logging setup used across the
//! workspace.

pub mod config;
pub mod logging;

pub use config::{AzureOpenAISettings, Settings};
pub use logging::{init_test_tracing, init_tracing};
