//! Router error types

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::formatter::FormatError;

/// The two kinds of destination a router can write to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    Path,
    Writer,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Path => f.write_str("path"),
            DestinationKind::Writer => f.write_str("writer"),
        }
    }
}

/// Errors that can occur while routing an entry
#[derive(Error, Debug)]
pub enum RouteError {
    /// The formatter could not render the entry
    #[error("failed to format entry: {0}")]
    Format(#[from] FormatError),

    /// The destination file could not be opened
    #[error("failed to open logfile {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a stream destination failed
    #[error("failed to write entry: {0}")]
    Write(#[source] std::io::Error),

    /// A default would mix file and stream destinations on one router
    #[error("router already routes by {configured}; refusing a default {requested}")]
    MixedDestinations {
        configured: DestinationKind,
        requested: DestinationKind,
    },
}

impl RouteError {
    /// Create an open error for `path`
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a mixed destination error
    pub fn mixed(configured: DestinationKind, requested: DestinationKind) -> Self {
        Self::MixedDestinations {
            configured,
            requested,
        }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
