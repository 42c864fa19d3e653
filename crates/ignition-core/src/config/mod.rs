//! # Ignition Core Configuration
//!
//! The configuration store consumed by the application controller and the
//! configuration accessor. Values are arbitrary JSON trees keyed by a
//! top-level name; nested values are addressed with dot-separated paths
//! (`"app.name"`).
//!
//! File fragments in JSON (always), YAML (`yaml-config` feature) and TOML
//! (`toml-config` feature) can be merged into a store via
//! [`Configuration::merge_file`].
pub mod error;
pub mod format;
pub mod store;

pub use error::ConfigError;
pub use format::ConfigFormat;
pub use store::Configuration;

// Test module declaration
#[cfg(test)]
mod tests;
