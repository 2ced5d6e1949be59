//! Hook trait and error types

use thiserror::Error;

use crate::router::RouteError;
use crate::types::{Entry, Level};

/// Errors returned by a hook
#[derive(Error, Debug)]
pub enum HookError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("hook error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    /// Wrap any error raised by a custom hook
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }
}

pub type HookResult<T> = Result<T, HookError>;

/// Something the logging pipeline calls for every entry at the levels it claims
pub trait Hook: Send + Sync {
    /// Levels this hook wants to see; queried once at registration
    fn levels(&self) -> &[Level];

    /// Handle one entry
    fn fire(&self, entry: &Entry) -> HookResult<()>;
}

impl Hook for crate::router::LevelRouter {
    fn levels(&self) -> &[Level] {
        crate::router::LevelRouter::levels(self)
    }

    fn fire(&self, entry: &Entry) -> HookResult<()> {
        crate::router::LevelRouter::fire(self, entry).map_err(HookError::from)
    }
}
