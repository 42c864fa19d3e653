use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::container::service::{Service, ServiceContainer, ServiceFactory};

/// How a namespace produces its service.
enum Binding {
    Instance(Service),
    Factory(ServiceFactory),
    Singleton {
        factory: ServiceFactory,
        cached: RwLock<Option<Service>>,
    },
}

impl Binding {
    fn produce(&self) -> Service {
        match self {
            Binding::Instance(service) => service.clone(),
            Binding::Factory(factory) => factory(),
            Binding::Singleton { factory, cached } => {
                let mut slot = cached.write().unwrap_or_else(PoisonError::into_inner);
                slot.get_or_insert_with(|| factory()).clone()
            }
        }
    }

    fn duplicate(&self) -> Binding {
        match self {
            Binding::Instance(service) => Binding::Instance(service.clone()),
            Binding::Factory(factory) => Binding::Factory(factory.clone()),
            Binding::Singleton { factory, cached } => Binding::Singleton {
                factory: factory.clone(),
                cached: RwLock::new(
                    cached
                        .read()
                        .unwrap_or_else(PoisonError::into_inner)
                        .clone(),
                ),
            },
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Instance(_) => write!(f, "Instance"),
            Binding::Factory(_) => write!(f, "Factory"),
            Binding::Singleton { .. } => write!(f, "Singleton"),
        }
    }
}

/// In-memory service container keyed by string namespaces.
#[derive(Debug, Default)]
pub struct DefaultServiceContainer {
    bindings: RwLock<HashMap<String, Binding>>,
}

impl DefaultServiceContainer {
    /// Create a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, namespace: &str, binding: Binding) {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.to_string(), binding);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Binding>> {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ServiceContainer for DefaultServiceContainer {
    fn bind(&self, namespace: &str, service: Service) {
        self.insert(namespace, Binding::Instance(service));
    }

    fn factory(&self, namespace: &str, factory: ServiceFactory) {
        self.insert(namespace, Binding::Factory(factory));
    }

    fn singleton(&self, namespace: &str, factory: ServiceFactory) {
        self.insert(
            namespace,
            Binding::Singleton {
                factory,
                cached: RwLock::new(None),
            },
        );
    }

    fn resolve(&self, namespace: &str) -> Option<Service> {
        self.read().get(namespace).map(Binding::produce)
    }

    fn has(&self, namespace: &str) -> bool {
        self.read().contains_key(namespace)
    }

    fn forget(&self, namespace: &str) -> bool {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(namespace)
            .is_some()
    }

    fn namespaces(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    fn clone_container(&self) -> Arc<dyn ServiceContainer> {
        let bindings = self
            .read()
            .iter()
            .map(|(namespace, binding)| (namespace.clone(), binding.duplicate()))
            .collect();
        Arc::new(DefaultServiceContainer {
            bindings: RwLock::new(bindings),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
