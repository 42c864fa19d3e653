use serde::Serialize;
use thiserror::Error;

use crate::config::error::ConfigError;
use crate::container::error::ContainerError;
use crate::env::error::EnvError;
use crate::provider::ProviderHook;

/// Application-level error aggregating every subsystem failure.
///
/// `Application::start` propagates these raw; `Application::run` normalizes
/// them into an [`ErrorReport`] before handing them to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("environment error: {0}")]
    Environment(#[from] EnvError),

    /// A provider hook failed during a lifecycle phase
    #[error("provider '{name}' failed during {hook}: {source}")]
    Provider {
        name: String,
        hook: ProviderHook,
        #[source]
        source: Box<AppError>,
    },

    /// A kernel hook failed
    #[error("kernel {hook} hook failed: {source}")]
    Kernel {
        hook: &'static str,
        #[source]
        source: Box<AppError>,
    },

    /// An auto-run child scope failed to come up
    #[error("scope '{name}' failed to start: {source}")]
    Scope {
        name: String,
        #[source]
        source: Box<AppError>,
    },

    /// An already-normalized error carried back into the error tree
    #[error(transparent)]
    Runtime(#[from] ErrorReport),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

/// Shorthand for Result with the application error type
pub type Result<T> = std::result::Result<T, AppError>;

/// Normalized error shape broadcast on the `error` channel and returned by
/// `Application::run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{title}: {detail}")]
pub struct ErrorReport {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl ErrorReport {
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Normalize any application error into the standard report shape.
    pub fn normalize(error: &AppError) -> ErrorReport {
        match error {
            AppError::Container(ContainerError::MissingContainer) => ErrorReport::new(
                500,
                "Service container not defined",
                "A container must be registered before services can be resolved.",
            ),
            AppError::Runtime(report) => report.clone(),
            other => ErrorReport::new(500, "Internal application error", other.to_string()),
        }
    }
}
