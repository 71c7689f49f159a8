//! Prompt construction for agent-scenario
//!
//! - [`PromptBuilder`]: fluent assembly of plain-text prompts
//! - [`JinjaTemplate`]: MiniJinja templates rendered from any `Serialize`
//!   context, used for the simulated-user and judge system prompts

mod builder;
mod error;
mod jinja;

pub use builder::PromptBuilder;
pub use error::{PromptError, Result};
pub use jinja::JinjaTemplate;
