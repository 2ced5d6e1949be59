//! Plain text (logfmt) formatter

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde_json::Value;

use super::traits::{field_key, render_timestamp, validate_timestamp_format, FormatResult, Formatter};
use crate::types::{Entry, Level};

/// Timestamp layout used when none is configured (RFC 3339, second precision)
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const RESET: &str = "\x1b[0m";

/// Renders entries as `time="..." level=info msg=... key=value` lines
///
/// With colors enabled the compact terminal layout is used instead:
/// `INFO[0003] message                  key=value`, with the level tag and
/// field keys colored by severity.
///
/// # Example
///
/// ```
/// use levelroute_core::formatter::{Formatter, TextFormatter};
/// use levelroute_core::{Entry, Level};
///
/// let formatter = TextFormatter::new().with_disable_timestamp(true);
/// let line = formatter.format(&Entry::new(Level::Info, "ready")).unwrap();
/// assert_eq!(line, b"level=info msg=ready\n");
/// ```
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Never emit ANSI styling, even when `force_colors` is set
    pub disable_colors: bool,
    /// Emit ANSI styling
    pub force_colors: bool,
    /// Leave the `time` key out
    pub disable_timestamp: bool,
    /// In colored output, print the full timestamp instead of elapsed seconds
    pub full_timestamp: bool,
    /// chrono strftime layout for timestamps
    pub timestamp_format: String,
    /// Quote empty values instead of printing `key=`
    pub quote_empty_fields: bool,
    base_time: DateTime<Local>,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFormatter {
    /// Create a text formatter with terminal defaults
    pub fn new() -> Self {
        Self {
            disable_colors: false,
            force_colors: false,
            disable_timestamp: false,
            full_timestamp: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            quote_empty_fields: false,
            base_time: Local::now(),
        }
    }

    /// Set whether ANSI styling is suppressed
    pub fn with_disable_colors(mut self, disable: bool) -> Self {
        self.disable_colors = disable;
        self
    }

    /// Set whether ANSI styling is emitted
    pub fn with_force_colors(mut self, force: bool) -> Self {
        self.force_colors = force;
        self
    }

    /// Set whether the timestamp is left out
    pub fn with_disable_timestamp(mut self, disable: bool) -> Self {
        self.disable_timestamp = disable;
        self
    }

    /// Set whether colored output prints full timestamps
    pub fn with_full_timestamp(mut self, full: bool) -> Self {
        self.full_timestamp = full;
        self
    }

    /// Set the strftime layout for timestamps
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Like `with_timestamp_format`, but rejects a layout chrono cannot render
    pub fn try_with_timestamp_format(self, format: impl Into<String>) -> FormatResult<Self> {
        let format = format.into();
        validate_timestamp_format(&format)?;
        Ok(self.with_timestamp_format(format))
    }

    /// Set whether empty values are quoted
    pub fn with_quote_empty_fields(mut self, quote: bool) -> Self {
        self.quote_empty_fields = quote;
        self
    }

    /// Whether this formatter will emit ANSI styling
    pub fn is_colored(&self) -> bool {
        self.force_colors && !self.disable_colors
    }

    fn timestamp(&self, entry: &Entry) -> FormatResult<String> {
        render_timestamp(&entry.time, &self.timestamp_format)
    }

    fn write_plain(&self, out: &mut String, entry: &Entry) -> FormatResult<()> {
        if !self.disable_timestamp {
            self.append_pair(out, "time", &self.timestamp(entry)?);
        }
        self.append_pair(out, "level", entry.level.as_str());
        if !entry.message.is_empty() {
            self.append_pair(out, "msg", &entry.message);
        }
        for (key, value) in &entry.fields {
            self.append_pair(out, &field_key(key), &value_text(value));
        }
        Ok(())
    }

    fn write_colored(&self, out: &mut String, entry: &Entry) -> FormatResult<()> {
        let color = level_color(entry.level);
        let mut tag = entry.level.as_str().to_uppercase();
        tag.truncate(4);

        let _ = if self.disable_timestamp {
            write!(out, "\x1b[{}m{}{} {:<44}", color, tag, RESET, entry.message)
        } else if self.full_timestamp {
            write!(
                out,
                "\x1b[{}m{}{}[{}] {:<44}",
                color,
                tag,
                RESET,
                self.timestamp(entry)?,
                entry.message
            )
        } else {
            let elapsed = (entry.time - self.base_time).num_seconds().max(0);
            write!(
                out,
                "\x1b[{}m{}{}[{:04}] {:<44}",
                color, tag, RESET, elapsed, entry.message
            )
        };

        for (key, value) in &entry.fields {
            let _ = write!(out, " \x1b[{}m{}{}=", color, field_key(key), RESET);
            self.append_value(out, &value_text(value));
        }
        Ok(())
    }

    fn append_pair(&self, out: &mut String, key: &str, value: &str) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(key);
        out.push('=');
        self.append_value(out, value);
    }

    fn append_value(&self, out: &mut String, value: &str) {
        if self.needs_quoting(value) {
            let _ = write!(out, "{:?}", value);
        } else {
            out.push_str(value);
        }
    }

    fn needs_quoting(&self, value: &str) -> bool {
        if value.is_empty() {
            return self.quote_empty_fields;
        }
        !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+'))
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &Entry) -> FormatResult<Vec<u8>> {
        let mut out = String::with_capacity(64 + entry.message.len());
        if self.is_colored() {
            self.write_colored(&mut out, entry)?;
        } else {
            self.write_plain(&mut out, entry)?;
        }
        out.push('\n');
        Ok(out.into_bytes())
    }

    fn disable_colors(&mut self) {
        self.disable_colors = true;
    }
}

/// Strings print bare; everything else prints as compact JSON
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn level_color(level: Level) -> u8 {
    match level {
        Level::Debug | Level::Trace => 37,
        Level::Warn => 33,
        Level::Error | Level::Fatal | Level::Panic => 31,
        Level::Info => 36,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatError;
    use chrono::TimeZone;

    fn fixed_entry(level: Level, message: &str) -> Entry {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        Entry::new(level, message).with_time(time)
    }

    fn render(formatter: &TextFormatter, entry: &Entry) -> String {
        String::from_utf8(formatter.format(entry).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_line_layout() {
        let formatter = TextFormatter::new().with_timestamp_format("%Y-%m-%d %H:%M:%S");
        let entry = fixed_entry(Level::Error, "connection refused")
            .with_field("port", 5432)
            .with_field("host", "db-1");

        assert_eq!(
            render(&formatter, &entry),
            "time=\"2024-03-09 14:05:07\" level=error msg=\"connection refused\" host=db-1 port=5432\n"
        );
    }

    #[test]
    fn test_disable_timestamp() {
        let formatter = TextFormatter::new().with_disable_timestamp(true);
        let line = render(&formatter, &fixed_entry(Level::Warn, "slow"));
        assert_eq!(line, "level=warning msg=slow\n");
    }

    #[test]
    fn test_quoting_rules() {
        let formatter = TextFormatter::new().with_disable_timestamp(true);
        let entry = fixed_entry(Level::Info, "x")
            .with_field("path", "/var/log/app.log")
            .with_field("eq", "a=b")
            .with_field("quote", "say \"hi\"")
            .with_field("empty", "");

        let line = render(&formatter, &entry);
        assert!(line.contains("path=/var/log/app.log"));
        assert!(line.contains("eq=\"a=b\""));
        assert!(line.contains(r#"quote="say \"hi\"""#));
        assert!(line.contains("empty= ") || line.contains("empty=\n"));

        let quoting = formatter.with_quote_empty_fields(true);
        assert!(render(&quoting, &entry).contains("empty=\"\""));
    }

    #[test]
    fn test_colors_only_when_forced() {
        let entry = fixed_entry(Level::Error, "boom");

        let plain = TextFormatter::new();
        assert!(!plain.is_colored());
        assert!(!render(&plain, &entry).contains('\x1b'));

        let colored = TextFormatter::new().with_force_colors(true);
        assert!(colored.is_colored());
        let line = render(&colored, &entry);
        assert!(line.starts_with("\x1b[31mERRO\x1b[0m"));
    }

    #[test]
    fn test_disable_colors_overrides_force() {
        let mut formatter = TextFormatter::new().with_force_colors(true);
        Formatter::disable_colors(&mut formatter);

        assert!(!formatter.is_colored());
        let line = render(&formatter, &fixed_entry(Level::Info, "hello"));
        assert!(!line.contains('\x1b'));
        assert!(line.contains("level=info"));
    }

    #[test]
    fn test_reserved_field_names_are_prefixed() {
        let formatter = TextFormatter::new().with_disable_timestamp(true);
        let entry = fixed_entry(Level::Error, "real")
            .with_field("level", "x")
            .with_field("msg", "shadow");

        assert_eq!(
            render(&formatter, &entry),
            "level=error msg=real fields.level=x fields.msg=shadow\n"
        );

        let colored = formatter.with_force_colors(true);
        let line = render(&colored, &entry);
        assert!(line.contains("\x1b[31mfields.level\x1b[0m=x"));
    }

    #[test]
    fn test_bad_timestamp_format_is_error() {
        let entry = fixed_entry(Level::Info, "x");

        let plain = TextFormatter::new().with_timestamp_format("%Q");
        assert!(matches!(
            plain.format(&entry),
            Err(FormatError::InvalidTimestampFormat(_))
        ));

        let colored = plain
            .clone()
            .with_force_colors(true)
            .with_full_timestamp(true);
        assert!(colored.format(&entry).is_err());

        // the layout is only used when a timestamp is printed
        let untimed = plain.with_disable_timestamp(true);
        assert_eq!(render(&untimed, &entry), "level=info msg=x\n");
    }

    #[test]
    fn test_try_with_timestamp_format() {
        assert!(TextFormatter::new().try_with_timestamp_format("%H:%M").is_ok());
        assert!(matches!(
            TextFormatter::new().try_with_timestamp_format("%Q"),
            Err(FormatError::InvalidTimestampFormat(_))
        ));
    }

    #[test]
    fn test_colored_full_timestamp() {
        let formatter = TextFormatter::new()
            .with_force_colors(true)
            .with_full_timestamp(true)
            .with_timestamp_format("%H:%M:%S");
        let line = render(&formatter, &fixed_entry(Level::Warn, "careful").with_field("n", 1));
        assert!(line.starts_with("\x1b[33mWARN\x1b[0m[14:05:07] careful"));
        assert!(line.contains(" \x1b[33mn\x1b[0m=1"));
    }
}
