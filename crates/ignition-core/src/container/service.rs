use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased service stored in a container
pub type Service = Arc<dyn Any + Send + Sync>;

/// A deferred service constructor
pub type ServiceFactory = Arc<dyn Fn() -> Service + Send + Sync>;

/// Contract every service container must satisfy.
///
/// Namespaces are plain strings; services are type-erased `Arc`s. A container
/// must be able to derive an independent copy of itself so child scopes can
/// start from the parent's bindings without sharing mutation.
pub trait ServiceContainer: Send + Sync + fmt::Debug {
    /// Bind an already-built service under a namespace
    fn bind(&self, namespace: &str, service: Service);

    /// Register a constructor invoked on every resolution
    fn factory(&self, namespace: &str, factory: ServiceFactory);

    /// Register a constructor invoked once; the result is cached
    fn singleton(&self, namespace: &str, factory: ServiceFactory);

    /// Resolve the service bound under a namespace
    fn resolve(&self, namespace: &str) -> Option<Service>;

    /// Check whether a namespace is bound
    fn has(&self, namespace: &str) -> bool;

    /// Drop a binding. Returns whether anything was removed.
    fn forget(&self, namespace: &str) -> bool;

    /// All bound namespaces
    fn namespaces(&self) -> Vec<String>;

    /// Derive an independent copy of the current bindings
    fn clone_container(&self) -> Arc<dyn ServiceContainer>;

    /// Cast to Any for downcasting to the concrete container type
    fn as_any(&self) -> &dyn Any;
}

impl dyn ServiceContainer {
    /// Resolve a service and downcast it to its concrete type
    pub fn resolve_as<T: Send + Sync + 'static>(&self, namespace: &str) -> Option<Arc<T>> {
        self.resolve(namespace)
            .and_then(|service| service.downcast::<T>().ok())
    }
}
