//! Log entry type handed to hooks and formatters

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde_json::Value;

use super::level::Level;

/// One structured log event
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Severity, used as the routing key
    pub level: Level,
    /// Human readable message
    pub message: String,
    /// When the event was created
    pub time: DateTime<Local>,
    /// Structured fields, kept sorted by key
    pub fields: BTreeMap<String, Value>,
}

impl Entry {
    /// Create an entry stamped with the current local time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Local::now(),
            fields: BTreeMap::new(),
        }
    }

    /// Attach a structured field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Override the timestamp
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = Entry::new(Level::Warn, "disk almost full")
            .with_field("mount", "/var")
            .with_field("used_pct", 93);

        assert_eq!(entry.level, Level::Warn);
        assert_eq!(entry.message, "disk almost full");
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields["used_pct"], Value::from(93));
    }

    #[test]
    fn test_fields_are_sorted() {
        let entry = Entry::new(Level::Info, "m")
            .with_field("zeta", 1)
            .with_field("alpha", 2);
        let keys: Vec<_> = entry.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
