//! levelroute core
//!
//! A logging hook that routes each entry to a destination chosen by its
//! severity level. Destinations are either files (opened, appended to and
//! closed per entry) or shared byte streams, with an optional default for
//! levels that have no explicit route.
//!
//! ```rust,no_run
//! use levelroute_core::{Entry, Level, LevelRouter};
//!
//! let router = LevelRouter::with_paths([
//!     (Level::Error, "/var/log/app/error.log"),
//!     (Level::Fatal, "/var/log/app/error.log"),
//! ]);
//! router.set_default_path("/var/log/app/app.log")?;
//!
//! router.fire(&Entry::new(Level::Error, "upstream timed out").with_field("attempt", 3))?;
//! # Ok::<(), levelroute_core::RouteError>(())
//! ```
//!
//! Routers can also be described in YAML (see [`config::RouteConfig`]) and
//! registered with a [`hook::LevelHooks`] registry alongside other hooks.

pub mod types;
pub mod formatter;
pub mod logging;
pub mod router;
pub mod hook;
pub mod config;

// Re-export commonly used types
pub use types::{Entry, Level, ParseLevelError};

pub use formatter::{
    Formatter, BoxedFormatter, FormatError, FormatResult,
    TextFormatter, JsonFormatter, default_formatter,
};

pub use logging::{Logger, SharedLogger, ConsoleLogger, NoOpLogger, MemoryLogger};

pub use router::{
    LevelRouter, RouteMode, RoutingTable,
    PathMap, WriterMap, SharedWriter, shared_writer,
    RouteError, RouteResult, DestinationKind,
};

pub use hook::{Hook, HookError, HookResult, LevelHooks};

pub use config::{RouteConfig, FormatterConfig, ConfigError, ConfigResult};
