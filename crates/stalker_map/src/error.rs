//! Map loading errors

use thiserror::Error;

/// Result type for map operations
pub type Result<T> = std::result::Result<T, MapError>;

/// Map loading errors
#[derive(Debug, Error)]
pub enum MapError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A required settings key is absent
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
    /// A settings key has the wrong arity or range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
    /// Tile density must be strictly positive
    #[error("Invalid tile density: {0}")]
    InvalidDensity(f32),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// Bundle extension not recognised
    #[error("Unknown bundle format: {0}")]
    UnknownFormat(String),
    /// Bundle written by a newer version
    #[error("Version mismatch: bundle version {0}, supported version {1}")]
    VersionMismatch(u32, u32),
}
