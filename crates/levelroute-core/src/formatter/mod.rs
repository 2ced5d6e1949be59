//! Pluggable entry formatters
//!
//! - `Formatter` trait for implementing custom renderers
//! - Built-in implementations: `TextFormatter`, `JsonFormatter`

mod traits;
mod text;
mod json;

pub use traits::{Formatter, BoxedFormatter, FormatError, FormatResult, validate_timestamp_format};
pub use text::{TextFormatter, DEFAULT_TIMESTAMP_FORMAT};
pub use json::JsonFormatter;

/// Formatter used by routers that are not given one: plain text, no colors
pub fn default_formatter() -> BoxedFormatter {
    Box::new(TextFormatter::new().with_disable_colors(true))
}
