//! Configuration error types

use crate::formatter::FormatError;
use crate::router::RouteError;

/// Errors that can occur while loading or applying a route config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatter error: {0}")]
    Format(#[from] FormatError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
