use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading environment sources.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to read environment file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed entry at line {line} of environment file '{path}'")]
    Malformed { path: PathBuf, line: usize },

    #[error("environment source '{name}' failed: {message}")]
    Source { name: String, message: String },
}

/// Shorthand for Result with the environment error type
pub type Result<T> = std::result::Result<T, EnvError>;
