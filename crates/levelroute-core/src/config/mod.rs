//! Route configuration loaded from YAML or JSON
//!
//! - `RouteConfig`: per-level paths, default path and formatter choice
//! - `FormatterConfig`: `text` or `json` formatter settings

mod error;
mod formatter;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use formatter::FormatterConfig;
pub use file::RouteConfig;
