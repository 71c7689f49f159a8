//! Scenario simulation for LLM agents
//!
//! A [`Scenario`] pairs one or more agents under test with a
//! [`UserSimulatorAgent`] and, optionally, a [`JudgeAgent`].
//! [`ScenarioRunner`] drives the conversation turn by turn and returns a
//! [`ScenarioResult`]. Replies can be cached per run with [`CachedAgent`].

pub mod cache;
pub mod config;
pub mod error;
pub mod judge;
pub mod result;
pub mod runner;
pub mod scenario;
pub mod user_simulator;

pub use cache::{CacheKey, CachedAgent, ResponseCache};
pub use config::{DEFAULT_MAX_TURNS, ScenarioConfig};
pub use error::{Result, ScenarioError};
pub use judge::{JudgeAgent, Judgment, Verdict};
pub use result::ScenarioResult;
pub use runner::ScenarioRunner;
pub use scenario::{Scenario, ScenarioBuilder};
pub use user_simulator::UserSimulatorAgent;
