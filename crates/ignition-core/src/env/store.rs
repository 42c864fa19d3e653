use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use crate::env::error::Result;
use crate::env::source::EnvironmentSource;

/// Aggregating environment store.
///
/// Sources are loaded one at a time in registration order; keys from later
/// sources override earlier ones. Reads are served from the merged snapshot
/// taken by the last `init`/`init_sync` call.
#[derive(Debug, Default)]
pub struct Environment {
    sources: RwLock<Vec<Arc<dyn EnvironmentSource>>>,
    values: RwLock<HashMap<String, String>>,
}

impl Environment {
    /// Create a new empty environment store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source. Takes effect on the next `init`/`init_sync`.
    pub fn add_source(&self, source: Arc<dyn EnvironmentSource>) {
        self.sources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source);
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Load all sources, awaiting each in registration order
    pub async fn init(&self) -> Result<()> {
        let sources = self.snapshot_sources();
        let mut merged = HashMap::new();
        for source in sources {
            log::debug!("loading environment source '{}'", source.name());
            merged.extend(source.load().await?);
        }
        *self.write_values() = merged;
        Ok(())
    }

    /// Load all sources without suspending
    pub fn init_sync(&self) -> Result<()> {
        let sources = self.snapshot_sources();
        let mut merged = HashMap::new();
        for source in sources {
            log::debug!("loading environment source '{}'", source.name());
            merged.extend(source.load_sync()?);
        }
        *self.write_values() = merged;
        Ok(())
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<String> {
        self.read_values().get(key).cloned()
    }

    /// Look up a variable with a fallback
    pub fn get_or(&self, key: &str, fallback: impl Into<String>) -> String {
        self.get(key).unwrap_or_else(|| fallback.into())
    }

    /// Look up a variable and parse it
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|value| value.parse().ok())
    }

    pub fn has(&self, key: &str) -> bool {
        self.read_values().contains_key(key)
    }

    /// Derive an independent copy carrying the current sources and values
    pub fn create_scope(&self) -> Environment {
        Environment {
            sources: RwLock::new(self.snapshot_sources()),
            values: RwLock::new(self.read_values().clone()),
        }
    }

    fn snapshot_sources(&self) -> Vec<Arc<dyn EnvironmentSource>> {
        self.sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn read_values(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_values(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}
