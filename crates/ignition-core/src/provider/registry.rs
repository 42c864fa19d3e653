use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::provider::ServiceProvider;

/// Insertion-ordered provider registry keyed by name.
///
/// Hook execution order is the order keys were first inserted; re-inserting
/// an existing key replaces the provider but keeps its position.
#[derive(Default)]
pub struct ProviderRegistry {
    order: Vec<String>,
    providers: HashMap<String, Arc<dyn ServiceProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a provider. Returns whether the key was new.
    pub fn insert(&mut self, key: impl Into<String>, provider: Arc<dyn ServiceProvider>) -> bool {
        let key = key.into();
        let is_new = self.providers.insert(key.clone(), provider).is_none();
        if is_new {
            self.order.push(key);
        }
        is_new
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn ServiceProvider>> {
        self.providers.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.providers.contains_key(key)
    }

    /// Registered keys in insertion order
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    /// Providers in insertion order
    pub fn providers(&self) -> Vec<Arc<dyn ServiceProvider>> {
        self.entries().into_iter().map(|(_, p)| p).collect()
    }

    /// Key/provider pairs in insertion order
    pub fn entries(&self) -> Vec<(String, Arc<dyn ServiceProvider>)> {
        self.order
            .iter()
            .filter_map(|key| {
                self.providers
                    .get(key)
                    .map(|provider| (key.clone(), provider.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
