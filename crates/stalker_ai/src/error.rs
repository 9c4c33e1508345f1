//! AI error types

use thiserror::Error;

/// Result type for AI setup
pub type Result<T> = std::result::Result<T, AiError>;

/// AI errors. Runtime behavior never fails; only setup is validated.
#[derive(Debug, Error)]
pub enum AiError {
    /// A configuration value is out of range
    #[error("Invalid config '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl AiError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
