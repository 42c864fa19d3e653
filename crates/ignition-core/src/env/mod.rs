//! # Ignition Core Environment
//!
//! Environment-variable resolution for the bootstrap sequence. An
//! [`Environment`](store::Environment) store aggregates ordered
//! [`EnvironmentSource`](source::EnvironmentSource) implementations; sources
//! registered later override keys from earlier ones. Initialization exists in
//! an asynchronous form (`init`) awaited by the controller's environment
//! phase and a blocking form (`init_sync`) for the blocking facade.
pub mod error;
pub mod source;
pub mod store;

pub use error::EnvError;
pub use source::{EnvironmentSource, FileEnv, ProcessEnv, StaticEnv};
pub use store::Environment;

// Test module declaration
#[cfg(test)]
mod tests;
