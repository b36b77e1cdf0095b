use crate::core::MatchError;
use crate::services::{LoadError, WriteError};
use thiserror::Error;

/// Top-level failure of a matching run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("logging setup failed: {0}")]
    Telemetry(String),

    #[error("could not load responses: {0}")]
    Load(#[from] LoadError),

    #[error("matching failed: {0}")]
    Match(#[from] MatchError),

    #[error("could not save matches: {0}")]
    Write(#[from] WriteError),

    #[error("could not render summary: {0}")]
    Summary(#[from] serde_json::Error),
}
