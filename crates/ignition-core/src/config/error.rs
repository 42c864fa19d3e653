use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the configuration store and fragment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize configuration value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {format} configuration fragment: {message}")]
    Parse { format: &'static str, message: String },

    #[error("unknown or unsupported configuration format for path: {path}")]
    UnknownFormat { path: PathBuf },

    #[error("failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Shorthand for Result with the configuration error type
pub type Result<T> = std::result::Result<T, ConfigError>;
