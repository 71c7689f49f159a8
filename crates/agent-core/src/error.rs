//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote completion service failed
    #[error("Completion failed: {0}")]
    Completion(String),
}

impl Error {
    /// True for failures of the remote completion call
    pub fn is_completion(&self) -> bool {
        matches!(self, Error::Completion(_))
    }
}
