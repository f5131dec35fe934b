use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the localization store and its loaders.
///
/// Missing keys and unknown languages are never errors; they resolve to
/// `None` or to the missing-localization fallback.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Language callback failed: {0}")]
    Callback(#[source] anyhow::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported dictionary format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
