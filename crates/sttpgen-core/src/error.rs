use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path template must start with '/': {0}")]
    InvalidPath(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid package name for {key}: {value:?}")]
    InvalidPackage { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum LowerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A recoverable problem found while lowering. The pipeline logs it, skips
/// the offending item and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    #[error("expected to find model {name} (referenced by {referenced_by}), but no model was found")]
    MissingModel { name: String, referenced_by: String },

    #[error("status code is not an integer: {code:?} (operation {operation})")]
    MalformedStatusCode { operation: String, code: String },
}

impl Issue {
    /// Emit the issue through the `log` facade at its conventional level.
    pub fn log(&self) {
        match self {
            Issue::MissingModel { .. } => log::warn!("{self}"),
            Issue::MalformedStatusCode { .. } => log::error!("{self}"),
        }
    }
}
