use thiserror::Error;

/// Errors raised by service resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// A service was requested before any container was registered
    #[error("service container not defined; register a container before resolving services")]
    MissingContainer,

    #[error("no service bound under namespace '{0}'")]
    UnknownNamespace(String),

    #[error("service bound under namespace '{namespace}' is not a {expected}")]
    TypeMismatch {
        namespace: String,
        expected: &'static str,
    },
}

/// Shorthand for Result with the container error type
pub type Result<T> = std::result::Result<T, ContainerError>;
