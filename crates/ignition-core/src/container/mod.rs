//! # Ignition Core Service Container
//!
//! String-namespaced dependency-injection container consumed by the
//! application controller and the service accessor.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Container contract**: the [`ServiceContainer`](service::ServiceContainer)
//!   trait: bind, factory and singleton registration, resolution, and
//!   derivation of independent copies for child scopes.
//! - **Default implementation**: [`DefaultServiceContainer`](default::DefaultServiceContainer),
//!   an in-memory binding table.
//! - **Errors**: [`ContainerError`](error::ContainerError), including the
//!   missing-container case raised when services are resolved before any
//!   container is registered.
pub mod default;
pub mod error;
pub mod service;

pub use default::DefaultServiceContainer;
pub use error::ContainerError;
pub use service::{Service, ServiceContainer, ServiceFactory};

// Test module declaration
#[cfg(test)]
mod tests;
