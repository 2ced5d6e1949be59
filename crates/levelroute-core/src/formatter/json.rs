//! JSON lines formatter

use serde_json::{Map, Value};

use super::text::DEFAULT_TIMESTAMP_FORMAT;
use super::traits::{field_key, render_timestamp, validate_timestamp_format, FormatResult, Formatter};
use crate::types::Entry;

/// Renders each entry as a single JSON object followed by a newline
///
/// Entry fields are merged into the object. A field named `time`, `level`
/// or `msg` is kept under `fields.<name>` so it cannot clobber the
/// standard keys.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    /// Leave the `time` key out
    pub disable_timestamp: bool,
    /// chrono strftime layout for timestamps
    pub timestamp_format: String,
    /// Indent the output (the object then spans several lines)
    pub pretty_print: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            disable_timestamp: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            pretty_print: false,
        }
    }

    pub fn with_disable_timestamp(mut self, disable: bool) -> Self {
        self.disable_timestamp = disable;
        self
    }

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

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &Entry) -> FormatResult<Vec<u8>> {
        let mut object = Map::with_capacity(entry.fields.len() + 3);

        for (key, value) in &entry.fields {
            object.insert(field_key(key).into_owned(), value.clone());
        }

        if !self.disable_timestamp {
            let time = render_timestamp(&entry.time, &self.timestamp_format)?;
            object.insert("time".to_string(), Value::String(time));
        }
        object.insert("level".to_string(), Value::String(entry.level.to_string()));
        object.insert("msg".to_string(), Value::String(entry.message.clone()));

        let value = Value::Object(object);
        let mut bytes = if self.pretty_print {
            serde_json::to_vec_pretty(&value)?
        } else {
            serde_json::to_vec(&value)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }
}
