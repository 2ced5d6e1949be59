//! Formatter trait and error types

use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use thiserror::Error;

use crate::types::Entry;

/// Keys every formatter writes itself; entry fields with these names are
/// emitted as `fields.<name>`
pub(crate) const RESERVED_KEYS: [&str; 3] = ["time", "level", "msg"];

/// Errors that can occur while rendering an entry
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp format: {0:?}")]
    InvalidTimestampFormat(String),

    #[error("{0}")]
    Other(String),
}

impl FormatError {
    /// Create a free-form formatting error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

pub type FormatResult<T> = Result<T, FormatError>;

/// Check a chrono strftime layout without rendering anything
pub fn validate_timestamp_format(format: &str) -> FormatResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::InvalidTimestampFormat(format.to_string()));
    }
    Ok(())
}

/// Render `time` with `format`, failing instead of panicking on a bad layout
pub(crate) fn render_timestamp(time: &DateTime<Local>, format: &str) -> FormatResult<String> {
    let mut out = String::new();
    write!(out, "{}", time.format(format))
        .map_err(|_| FormatError::InvalidTimestampFormat(format.to_string()))?;
    Ok(out)
}

/// Output key for an entry field
pub(crate) fn field_key(key: &str) -> Cow<'_, str> {
    if RESERVED_KEYS.contains(&key) {
        Cow::Owned(format!("fields.{}", key))
    } else {
        Cow::Borrowed(key)
    }
}

/// Renders an entry into the bytes that get written to a destination
///
/// Implementations:
/// - `TextFormatter`: logfmt-style `key=value` lines (the default)
/// - `JsonFormatter`: one JSON object per line
pub trait Formatter: Send + Sync {
    /// Render one entry, including its trailing newline
    fn format(&self, entry: &Entry) -> FormatResult<Vec<u8>>;

    /// Turn off terminal styling
    ///
    /// Called whenever a formatter is installed on a router, since routed
    /// output goes to files and plain streams. Formatters that never emit
    /// styling keep the default no-op.
    fn disable_colors(&mut self) {}
}

/// Type alias for a boxed formatter
pub type BoxedFormatter = Box<dyn Formatter>;

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&self, entry: &Entry) -> FormatResult<Vec<u8>> {
        (**self).format(entry)
    }

    fn disable_colors(&mut self) {
        (**self).disable_colors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_timestamp_format() {
        assert!(validate_timestamp_format("%Y-%m-%dT%H:%M:%S%:z").is_ok());
        assert!(validate_timestamp_format("plain text").is_ok());

        let err = validate_timestamp_format("%Q").unwrap_err();
        assert!(matches!(err, FormatError::InvalidTimestampFormat(ref f) if f == "%Q"));
    }

    #[test]
    fn test_render_timestamp_bad_layout_is_error() {
        let now = Local::now();
        assert!(render_timestamp(&now, "%Y").is_ok());
        assert!(matches!(
            render_timestamp(&now, "%Q"),
            Err(FormatError::InvalidTimestampFormat(_))
        ));
    }

    #[test]
    fn test_field_key_prefixes_reserved_names() {
        assert_eq!(field_key("level"), "fields.level");
        assert_eq!(field_key("msg"), "fields.msg");
        assert_eq!(field_key("user"), "user");
    }
}
