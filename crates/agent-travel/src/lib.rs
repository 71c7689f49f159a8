//! Travel assistant agents and their scenario suite
//!
//! Three specialists (weather, travel planning, coordination) built on
//! [`agent_runtime::BaseAgent`], and three scenarios that exercise the
//! weather agent against a simulated user.
//!
//! # Example
//!
//! ```no_run
//! use agent_scenario::ScenarioConfig;
//! use agent_travel::{SuiteContext, scenarios};
//! use agent_utils::Settings;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::from_env();
//! let ctx = SuiteContext::from_settings(&settings, ScenarioConfig::from_settings(&settings))?;
//!
//! let result = scenarios::simple_agent_interaction(&ctx).await?;
//! println!("success: {}", result.success);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod context;
pub mod inspect;
pub mod scenarios;

pub use agents::{CoordinatorAgent, TravelPlannerAgent, WeatherAgent};
pub use context::SuiteContext;
pub use scenarios::TravelScenario;
