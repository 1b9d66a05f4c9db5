//! Error types for retry-runner
//!
//! Centralized error handling using thiserror. A run that exhausts its
//! attempts is an outcome, not an error; these variants cover faults around it.

use thiserror::Error;

/// All error types that can occur in retry-runner
#[derive(Debug, Error)]
pub enum RetryError {
    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Sampler sequence could not be built
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for retry-runner operations
pub type Result<T> = std::result::Result<T, RetryError>;
