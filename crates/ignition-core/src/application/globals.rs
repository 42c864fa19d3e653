use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::bootstrap::{Application, ContainerSlot};
use crate::container::error::ContainerError;
use crate::container::{Service, ServiceContainer};
use crate::config::Configuration;
use crate::env::Environment;

/// Read-only accessor over an application's configuration store.
#[derive(Debug, Clone)]
pub struct ConfigAccessor {
    configuration: Arc<Configuration>,
}

impl ConfigAccessor {
    pub(crate) fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.configuration.get(path)
    }

    pub fn get_or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        self.configuration.get_or(path, fallback)
    }

    pub fn value(&self, path: &str) -> Option<Value> {
        self.configuration.value(path)
    }

    pub fn has(&self, path: &str) -> bool {
        self.configuration.has(path)
    }
}

/// Read-only accessor over an application's environment store.
#[derive(Debug, Clone)]
pub struct EnvAccessor {
    environment: Arc<Environment>,
}

impl EnvAccessor {
    pub(crate) fn new(environment: Arc<Environment>) -> Self {
        Self { environment }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.environment.get(key)
    }

    pub fn get_or(&self, key: &str, fallback: impl Into<String>) -> String {
        self.environment.get_or(key, fallback)
    }

    pub fn has(&self, key: &str) -> bool {
        self.environment.has(key)
    }
}

/// Resolves services out of the owning application's container.
///
/// The accessor holds the container *slot*, not the container, so it
/// observes a container registered after the accessor was handed out and
/// reports [`ContainerError::MissingContainer`] until then.
#[derive(Clone)]
pub struct ServiceAccessor {
    slot: ContainerSlot,
}

impl ServiceAccessor {
    pub(crate) fn new(slot: ContainerSlot) -> Self {
        Self { slot }
    }

    /// Resolve the service bound under a namespace
    pub fn resolve(&self, namespace: &str) -> Result<Service, ContainerError> {
        self.container()?
            .resolve(namespace)
            .ok_or_else(|| ContainerError::UnknownNamespace(namespace.to_string()))
    }

    /// Resolve a service and downcast it to its concrete type
    pub fn resolve_as<T: Send + Sync + 'static>(
        &self,
        namespace: &str,
    ) -> Result<Arc<T>, ContainerError> {
        self.resolve(namespace)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                namespace: namespace.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// The registered container itself
    pub fn container(&self) -> Result<Arc<dyn ServiceContainer>, ContainerError> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ContainerError::MissingContainer)
    }
}

impl fmt::Debug for ServiceAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccessor").finish_non_exhaustive()
    }
}

/// Cheap handle on an application, held weakly so an ambient registry never
/// keeps an application alive on its own.
#[derive(Debug, Clone)]
pub struct AppHandle {
    inner: Weak<Application>,
}

impl AppHandle {
    pub(crate) fn new(inner: Weak<Application>) -> Self {
        Self { inner }
    }

    /// The application, if it is still alive
    pub fn get(&self) -> Option<Arc<Application>> {
        self.inner.upgrade()
    }
}

/// Caller-owned registry of ambient accessors.
///
/// Each slot is set at most once; later installations are skipped. An
/// application installs its enabled accessors here during the globals phase.
/// By default every application gets its own private registry; pass
/// [`AmbientRegistry::process`] to an application to bridge the accessors
/// into one process-wide registry instead.
#[derive(Debug, Default)]
pub struct AmbientRegistry {
    services: RwLock<Option<ServiceAccessor>>,
    env: RwLock<Option<EnvAccessor>>,
    config: RwLock<Option<ConfigAccessor>>,
    app: RwLock<Option<AppHandle>>,
}

impl AmbientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn process() -> Arc<AmbientRegistry> {
        static PROCESS: OnceLock<Arc<AmbientRegistry>> = OnceLock::new();
        PROCESS.get_or_init(|| Arc::new(AmbientRegistry::new())).clone()
    }

    pub fn services(&self) -> Option<ServiceAccessor> {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn env(&self) -> Option<EnvAccessor> {
        self.env
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn config(&self) -> Option<ConfigAccessor> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn app(&self) -> Option<AppHandle> {
        self.app
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove every installed accessor. Intended for test isolation when the
    /// process-wide registry is shared across cases.
    pub fn clear(&self) {
        *self.services.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.env.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.app.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub(crate) fn set_services_if_absent(&self, accessor: ServiceAccessor) -> bool {
        Self::set_if_absent(&self.services, accessor)
    }

    pub(crate) fn set_env_if_absent(&self, accessor: EnvAccessor) -> bool {
        Self::set_if_absent(&self.env, accessor)
    }

    pub(crate) fn set_config_if_absent(&self, accessor: ConfigAccessor) -> bool {
        Self::set_if_absent(&self.config, accessor)
    }

    pub(crate) fn set_app_if_absent(&self, handle: AppHandle) -> bool {
        Self::set_if_absent(&self.app, handle)
    }

    fn set_if_absent<T>(slot: &RwLock<Option<T>>, value: T) -> bool {
        let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return false;
        }
        *guard = Some(value);
        true
    }
}
