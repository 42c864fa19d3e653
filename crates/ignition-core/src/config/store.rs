use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::error::{ConfigError, Result};
use crate::config::format::ConfigFormat;

/// Hierarchical configuration store backed by JSON values.
///
/// Top-level keys map to arbitrary JSON trees. Reads take dot-separated
/// paths; path segments that parse as integers index into arrays.
#[derive(Debug, Default)]
pub struct Configuration {
    values: RwLock<HashMap<String, Value>>,
}

impl Configuration {
    /// Create a new empty configuration store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level key to any serializable value
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| ConfigError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.write().insert(key.to_string(), value);
        Ok(())
    }

    /// Raw value lookup by dot-separated path
    pub fn value(&self, path: &str) -> Option<Value> {
        let values = self.read();
        let mut segments = path.split('.');
        let mut current = values.get(segments.next()?)?;
        for segment in segments {
            current = match segment.parse::<usize>() {
                Ok(index) => current.get(index)?,
                Err(_) => current.get(segment)?,
            };
        }
        Some(current.clone())
    }

    /// Typed value lookup by dot-separated path
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.value(path)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Typed value lookup with a fallback
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        self.get(path).unwrap_or(fallback)
    }

    /// Check whether a path resolves to a value
    pub fn has(&self, path: &str) -> bool {
        self.value(path).is_some()
    }

    /// All top-level keys
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Merge top-level entries, overriding existing keys
    pub fn merge(&self, entries: HashMap<String, Value>) {
        self.write().extend(entries);
    }

    /// Merge a configuration file fragment, detecting the format from the
    /// file extension.
    pub fn merge_file(&self, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge(format.parse(&data)?);
        Ok(())
    }

    /// Derive an independent copy of the current contents.
    ///
    /// Later writes on either side are not visible to the other.
    pub fn create_scope(&self) -> Configuration {
        Configuration {
            values: RwLock::new(self.read().clone()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Value>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}
