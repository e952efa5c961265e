//! Error types shared across Framecut crates.

use std::path::PathBuf;

/// Top-level error type for Framecut operations.
#[derive(Debug, thiserror::Error)]
pub enum FramecutError {
    #[error("Media error: {message}")]
    Media { message: String },

    #[error("Media not ready: {message}")]
    NotReady { message: String },

    #[error("Trim error: {message}")]
    Trim { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("No export service registered under plugin name '{plugin_name}'")]
    ServiceNotFound { plugin_name: String },

    #[error("Host transport error: {message}")]
    Transport { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using FramecutError.
pub type FramecutResult<T> = Result<T, FramecutError>;

impl FramecutError {
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media {
            message: msg.into(),
        }
    }

    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady {
            message: msg.into(),
        }
    }

    pub fn trim(msg: impl Into<String>) -> Self {
        Self::Trim {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_config(text: &str) -> FramecutResult<serde_json::Value> {
        Ok(serde_json::from_str(text)?)
    }

    #[test]
    fn test_json_errors_convert() {
        let err = read_config("{ nope").unwrap_err();
        assert!(matches!(err, FramecutError::Json(_)));
    }

    #[test]
    fn test_not_found_names_plugin() {
        let err = FramecutError::ServiceNotFound {
            plugin_name: "upload".to_string(),
        };
        assert!(err.to_string().contains("'upload'"));
    }
}
