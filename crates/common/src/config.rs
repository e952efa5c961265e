//! Application configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editor defaults.
    pub editor: EditorDefaults,

    /// Export services offered to the editor, in registry order.
    pub services: Vec<ServiceDescriptor>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Editor parameters supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Host-configured frame rate. The editor caps its "max" choice at 30.
    pub fps: u32,

    /// Playback tick period in milliseconds.
    pub tick_interval_ms: u64,

    /// Output formats offered in the export controls.
    pub export_formats: Vec<String>,
}

/// Static description of an export service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Label shown in the service picker.
    pub title: String,

    /// Name used by the host to run this service directly.
    pub plugin_name: String,

    /// Output formats this service accepts.
    pub formats: BTreeSet<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "framecut=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let editor = EditorDefaults::default();
        let services = vec![ServiceDescriptor {
            title: "Save to file".to_string(),
            plugin_name: "framecut-save-file".to_string(),
            formats: editor.export_formats.iter().cloned().collect(),
        }];
        Self {
            editor,
            services,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            tick_interval_ms: 1,
            export_formats: ["gif", "mp4", "webm", "apng"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl ServiceDescriptor {
    pub fn new<I, S>(title: impl Into<String>, plugin_name: impl Into<String>, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            plugin_name: plugin_name.into(),
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this service accepts the given output format.
    pub fn supports(&self, format: &str) -> bool {
        self.formats.contains(format)
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }

    /// Standard config file location.
    pub fn default_path() -> PathBuf {
        config_file_path()
    }
}

fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("framecut").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_covers_all_formats() {
        let config = AppConfig::default();
        assert_eq!(config.services.len(), 1);
        for format in &config.editor.export_formats {
            assert!(config.services[0].supports(format));
        }
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"editor":{"fps":60}}"#).unwrap();
        assert_eq!(config.editor.fps, 60);
        assert_eq!(config.editor.tick_interval_ms, 1);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.services.len(), 1);
    }

    #[test]
    fn test_load_from_unparsable_file_falls_back() {
        let dir = std::env::temp_dir().join("framecut_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.editor.fps, 30);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("framecut_missing").join("config.json");
        let config = AppConfig::load_from(&path);
        assert_eq!(config.editor.export_formats.len(), 4);
    }
}
