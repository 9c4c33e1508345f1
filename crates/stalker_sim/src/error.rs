//! Runner errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Map error: {0}")]
    Map(#[from] stalker_map::MapError),

    #[error("AI setup error: {0}")]
    Ai(#[from] stalker_ai::AiError),
}
