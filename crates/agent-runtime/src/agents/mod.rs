//! Concrete agent implementations

pub mod base;

pub use base::BaseAgent;
