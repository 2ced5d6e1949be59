//! File-based route configuration (YAML)
//!
//! A user-level config lives at `<config dir>/levelroute/routes.yaml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use super::formatter::FormatterConfig;
use crate::router::{LevelRouter, RoutingTable};
use crate::types::Level;

/// Declarative description of a file-mode router
///
/// ```yaml
/// paths:
///   error: logs/error.log
///   fatal: logs/error.log
/// default_path: logs/app.log
/// formatter:
///   kind: text
/// ```
///
/// Relative paths are resolved against the directory of the file the
/// config was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Per-level log files
    #[serde(default)]
    pub paths: BTreeMap<Level, PathBuf>,

    /// File for levels missing from `paths`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_path: Option<PathBuf>,

    /// Formatter used for every route
    #[serde(default)]
    pub formatter: FormatterConfig,
}

impl RouteConfig {
    /// Default user-level location (`~/.config/levelroute/routes.yaml` on Linux)
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("levelroute").join("routes.yaml")
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a YAML config file
    ///
    /// A missing file yields the empty config, which builds a pass-through
    /// router.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        Ok(config)
    }

    /// Load the user-level config file
    pub fn load_user() -> ConfigResult<Self> {
        Self::load(Self::user_path())
    }

    /// Write this config as YAML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Make every relative path absolute against `base`
    pub fn resolve_relative(&mut self, base: &Path) {
        for path in self.paths.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(path) = self.default_path.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Build a router from this config
    ///
    /// An empty `paths` map gives a router without a table; it is still in
    /// file mode when `default_path` is set.
    pub fn build_router(&self) -> ConfigResult<LevelRouter> {
        let table = if self.paths.is_empty() {
            RoutingTable::None
        } else {
            RoutingTable::paths(self.paths.clone())
        };

        let router = LevelRouter::new(table, Some(self.formatter.build()?));
        if let Some(default_path) = &self.default_path {
            router.set_default_path(default_path.clone())?;
        }
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::formatter::FormatError;
    use crate::router::RouteMode;
    use crate::types::Entry;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
paths:
  error: logs/error.log
  fatal: logs/error.log
default_path: logs/app.log
formatter:
  kind: text
  disable_timestamp: true
"#;

    #[test]
    fn test_parse_yaml() {
        let config = RouteConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.paths.len(), 2);
        assert_eq!(config.paths[&Level::Error], PathBuf::from("logs/error.log"));
        assert_eq!(config.default_path, Some(PathBuf::from("logs/app.log")));
        assert!(matches!(
            config.formatter,
            FormatterConfig::Text {
                disable_timestamp: true,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let config =
            RouteConfig::from_json_str(r#"{"paths": {"warning": "/tmp/w.log"}}"#).unwrap();
        assert_eq!(config.paths[&Level::Warn], PathBuf::from("/tmp/w.log"));
        assert_eq!(config.default_path, None);
        assert_eq!(config.formatter, FormatterConfig::default());
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = RouteConfig::from_yaml_str("paths:\n  loud: x.log\n").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempdir().unwrap();
        let config = RouteConfig::load(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, RouteConfig::default());
        assert_eq!(config.build_router().unwrap().mode(), RouteMode::PassThrough);
    }

    #[test]
    fn test_load_resolves_relative_paths_and_routes() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("routes.yaml");
        fs::write(&config_path, SAMPLE).unwrap();

        let config = RouteConfig::load(&config_path).unwrap();
        let error_log = dir.path().join("logs/error.log");
        let app_log = dir.path().join("logs/app.log");
        assert_eq!(config.paths[&Level::Fatal], error_log);
        assert_eq!(config.default_path.as_ref(), Some(&app_log));

        let router = config.build_router().unwrap();
        assert_eq!(router.mode(), RouteMode::File);
        router.fire(&Entry::new(Level::Error, "disk failure")).unwrap();
        router.fire(&Entry::new(Level::Info, "heartbeat")).unwrap();

        assert_eq!(
            fs::read_to_string(&error_log).unwrap(),
            "level=error msg=\"disk failure\"\n"
        );
        assert_eq!(fs::read_to_string(&app_log).unwrap(), "level=info msg=heartbeat\n");
    }

    #[test]
    fn test_invalid_timestamp_format_rejected_at_build() {
        let dir = tempdir().unwrap();
        let yaml = format!(
            "default_path: {}\nformatter:\n  kind: text\n  timestamp_format: \"%Q\"\n",
            dir.path().join("a.log").display()
        );
        let config = RouteConfig::from_yaml_str(&yaml).unwrap();

        let err = config.build_router().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Format(FormatError::InvalidTimestampFormat(_))
        ));
        assert!(!dir.path().join("a.log").exists());

        let json = RouteConfig::from_json_str(
            r#"{"formatter": {"kind": "json", "timestamp_format": "%Y %Q"}}"#,
        )
        .unwrap();
        assert!(json.build_router().is_err());
    }

    #[test]
    fn test_bad_layout_on_live_router_is_returned_not_panicked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.log");
        let diagnostics = std::sync::Arc::new(crate::logging::MemoryLogger::new());
        let router = RouteConfig::default()
            .build_router()
            .unwrap()
            .with_diagnostics(diagnostics.clone());
        router.set_default_path(path.clone()).unwrap();
        router.set_formatter(crate::formatter::TextFormatter::new().with_timestamp_format("%Q"));

        let err = router.fire(&Entry::new(Level::Info, "x")).unwrap_err();
        assert!(matches!(err, crate::router::RouteError::Format(_)));
        assert_eq!(fs::read_to_string(&path).unwrap_or_default(), "");
        assert_eq!(diagnostics.messages_at(Level::Error).len(), 1);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("routes.yaml");

        let mut config = RouteConfig::default();
        config.paths.insert(Level::Debug, PathBuf::from("/var/log/debug.log"));
        config.formatter = FormatterConfig::Json {
            disable_timestamp: false,
            timestamp_format: None,
            pretty_print: false,
        };
        config.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("debug: /var/log/debug.log"));
        assert!(content.contains("kind: json"));
        assert_eq!(RouteConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_user_path_location() {
        let path = RouteConfig::user_path();
        assert!(path.ends_with("levelroute/routes.yaml"));
    }
}
