//! # Ignition Core
//!
//! Application-bootstrap framework: a lifecycle controller that wires a
//! configuration store, an environment-variable resolver, a service
//! container, user-supplied service providers and a kernel through a fixed
//! ordered sequence of phases, emitting lifecycle events at each stage.
//! Child "scopes" inherit selected parent state and run an overridable
//! subset of the provider hooks.
pub mod application;
pub mod config;
pub mod container;
pub mod env;
pub mod event;
pub mod kernel;
pub mod provider;

// Re-export key public types for use by hosts and provider crates
pub use application::bootstrap::Application;
pub use application::error::{AppError, ErrorReport, Result};
pub use application::globals::{AmbientRegistry, ConfigAccessor, EnvAccessor, ServiceAccessor};
pub use application::options::{AppOptions, Globals, GlobalsOverride, Resolvable};
pub use application::scope::{ScopeHooks, ScopeOverrides};
pub use application::sync::SyncApplication;
pub use config::Configuration;
pub use container::{DefaultServiceContainer, ServiceContainer};
pub use env::{Environment, EnvironmentSource, FileEnv, ProcessEnv, StaticEnv};
pub use event::{Event, EventBus, EventResult, LifecycleEvent};
pub use kernel::{Kernel, NullKernel};
pub use provider::{ProviderHook, ServiceProvider};

// Test module declaration
#[cfg(test)]
mod tests;
