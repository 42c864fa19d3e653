//! # Ignition Core Application
//!
//! The `application` module is the heart of the framework: the lifecycle
//! controller that wires a configuration store, an environment resolver, a
//! service container, a set of service providers and a kernel through a
//! fixed ordered sequence of phases, emitting a lifecycle event before and
//! after each phase.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Bootstrapping**: the [`Application`](bootstrap::Application) state
//!   machine (globals, container, environments, configurations, providers,
//!   kernel) with an idempotent `start` and a `run` entry point that
//!   normalizes failures.
//! - **Scoping**: child applications created by `create_scope` inherit
//!   selected parent state and run an overridable subset of the provider
//!   hooks, described by [`ScopeHooks`](scope::ScopeHooks).
//! - **Options**: the declarative [`AppOptions`](options::AppOptions) start
//!   configuration and the [`Resolvable`](options::Resolvable) instance-or-
//!   factory union.
//! - **Ambient accessors**: caller-owned accessor objects and the opt-in
//!   [`AmbientRegistry`](globals::AmbientRegistry) bridge.
//! - **Blocking facade**: [`SyncApplication`](sync::SyncApplication) for
//!   environments where asynchronous execution is undesirable.
//! - **Errors**: [`AppError`](error::AppError) and the normalized
//!   [`ErrorReport`](error::ErrorReport) broadcast on the `error` channel.
pub mod bootstrap;
pub mod error;
pub mod globals;
pub mod options;
pub mod scope;
pub mod sync;

pub use bootstrap::Application;
pub use error::{AppError, ErrorReport, Result};
pub use globals::{AmbientRegistry, AppHandle, ConfigAccessor, EnvAccessor, ServiceAccessor};
pub use options::{AppOptions, Globals, GlobalsOverride, Resolvable};
pub use scope::{ScopeHooks, ScopeOverrides};
pub use sync::SyncApplication;
