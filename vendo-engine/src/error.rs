//! Error types for the Vendo engine

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur when using the Vendo engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// No provider is registered under the given identifier
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// No job exists with the given identifier
    #[error("Job not found: {0}")]
    JobNotFound(Uuid),

    /// No review exists with the given identifier
    #[error("Review not found: {0}")]
    ReviewNotFound(Uuid),

    /// A request failed validation before touching any state
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The dispatch queue has been shut down
    #[error("Dispatch queue is closed")]
    QueueClosed,

    /// A bounded wait for a job resolution ran out of time
    #[error("Timed out waiting for job {0} to resolve")]
    WaitTimeout(Uuid),
}

impl EngineError {
    /// Create a validation error from a message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound(_) | Self::JobNotFound(_) | Self::ReviewNotFound(_)
        )
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
