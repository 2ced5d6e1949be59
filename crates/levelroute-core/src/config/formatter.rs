//! Formatter section of a route config

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use crate::formatter::{BoxedFormatter, JsonFormatter, TextFormatter};

/// Which formatter a configured router uses
///
/// ```yaml
/// formatter:
///   kind: json
///   pretty_print: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatterConfig {
    Text {
        #[serde(default)]
        disable_timestamp: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp_format: Option<String>,
        #[serde(default)]
        quote_empty_fields: bool,
    },
    Json {
        #[serde(default)]
        disable_timestamp: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp_format: Option<String>,
        #[serde(default)]
        pretty_print: bool,
    },
}

impl Default for FormatterConfig {
    fn default() -> Self {
        FormatterConfig::Text {
            disable_timestamp: false,
            timestamp_format: None,
            quote_empty_fields: false,
        }
    }
}

impl FormatterConfig {
    /// Build the formatter; text output never carries colors
    ///
    /// A `timestamp_format` chrono cannot render is rejected here rather
    /// than on the first write.
    pub fn build(&self) -> ConfigResult<BoxedFormatter> {
        match self {
            FormatterConfig::Text {
                disable_timestamp,
                timestamp_format,
                quote_empty_fields,
            } => {
                let mut formatter = TextFormatter::new()
                    .with_disable_colors(true)
                    .with_disable_timestamp(*disable_timestamp)
                    .with_quote_empty_fields(*quote_empty_fields);
                if let Some(format) = timestamp_format {
                    formatter = formatter.try_with_timestamp_format(format.clone())?;
                }
                Ok(Box::new(formatter))
            }
            FormatterConfig::Json {
                disable_timestamp,
                timestamp_format,
                pretty_print,
            } => {
                let mut formatter = JsonFormatter::new()
                    .with_disable_timestamp(*disable_timestamp)
                    .with_pretty_print(*pretty_print);
                if let Some(format) = timestamp_format {
                    formatter = formatter.try_with_timestamp_format(format.clone())?;
                }
                Ok(Box::new(formatter))
            }
        }
    }
}
