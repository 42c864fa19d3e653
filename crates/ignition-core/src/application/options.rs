use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::container::ServiceContainer;
use crate::env::EnvironmentSource;
use crate::kernel::Kernel;
use crate::provider::ServiceProvider;

/// A value that is either an already-built instance or a deferred factory.
///
/// Resolution is explicit: no construction is attempted on values that are
/// already instances, and factories are plain closures rather than anything
/// sniffed at runtime.
pub enum Resolvable<T: ?Sized> {
    Instance(Arc<T>),
    Factory(Arc<dyn Fn() -> Arc<T> + Send + Sync>),
}

impl<T: ?Sized> Resolvable<T> {
    pub fn instance(value: Arc<T>) -> Self {
        Resolvable::Instance(value)
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Resolvable::Factory(Arc::new(factory))
    }

    /// Produce the instance this value stands for
    pub fn resolve(&self) -> Arc<T> {
        match self {
            Resolvable::Instance(value) => value.clone(),
            Resolvable::Factory(factory) => factory(),
        }
    }
}

impl<T: ?Sized> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Resolvable::Instance(value) => Resolvable::Instance(value.clone()),
            Resolvable::Factory(factory) => Resolvable::Factory(factory.clone()),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolvable::Instance(_) => write!(f, "Instance"),
            Resolvable::Factory(_) => write!(f, "Factory"),
        }
    }
}

/// Which ambient accessors the bootstrap sequence may install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Globals {
    /// Publish a handle on the application itself
    pub app: bool,
    /// Publish the configuration accessor
    pub config: bool,
    /// Publish the environment accessor
    pub env: bool,
    /// Publish the service accessor
    pub services: bool,
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            app: false,
            config: true,
            env: true,
            services: true,
        }
    }
}

impl Globals {
    /// Merge a partial override over this policy
    pub fn apply(&mut self, overrides: &GlobalsOverride) {
        if let Some(app) = overrides.app {
            self.app = app;
        }
        if let Some(config) = overrides.config {
            self.config = config;
        }
        if let Some(env) = overrides.env {
            self.env = env;
        }
        if let Some(services) = overrides.services {
            self.services = services;
        }
    }
}

/// Partial [`Globals`] override carried by [`AppOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalsOverride {
    pub app: Option<bool>,
    pub config: Option<bool>,
    pub env: Option<bool>,
    pub services: Option<bool>,
}

impl GlobalsOverride {
    pub fn app(mut self, enabled: bool) -> Self {
        self.app = Some(enabled);
        self
    }

    pub fn config(mut self, enabled: bool) -> Self {
        self.config = Some(enabled);
        self
    }

    pub fn env(mut self, enabled: bool) -> Self {
        self.env = Some(enabled);
        self
    }

    pub fn services(mut self, enabled: bool) -> Self {
        self.services = Some(enabled);
        self
    }

    fn merge(&mut self, other: GlobalsOverride) {
        self.app = other.app.or(self.app);
        self.config = other.config.or(self.config);
        self.env = other.env.or(self.env);
        self.services = other.services.or(self.services);
    }
}

/// Declarative start configuration for an application.
///
/// List entries keep their declaration order; the provider registry and the
/// stores treat later entries as overrides of earlier ones under the same
/// key.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Providers keyed by name, in hook execution order
    pub providers: Vec<(String, Resolvable<dyn ServiceProvider>)>,
    /// Entry point; `NullKernel` when absent
    pub kernel: Option<Resolvable<dyn Kernel>>,
    /// Container override; the default container (or the parent's clone)
    /// when absent
    pub container: Option<Resolvable<dyn ServiceContainer>>,
    /// Environment sources keyed by name, in load order
    pub environments: Vec<(String, Resolvable<dyn EnvironmentSource>)>,
    /// Configuration entries set during the configuration phase, in order
    pub configurations: Vec<(String, Value)>,
    /// Ambient accessor policy override
    pub globals: GlobalsOverride,
    /// Run immediately when used as a scope sub-configuration
    pub auto_run: bool,
    /// Named sub-configurations consumed by `create_scope`
    pub scopes: HashMap<String, AppOptions>,
}

impl AppOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(
        mut self,
        key: impl Into<String>,
        provider: impl ServiceProvider + 'static,
    ) -> Self {
        self.providers
            .push((key.into(), Resolvable::instance(Arc::new(provider))));
        self
    }

    pub fn with_provider_source(
        mut self,
        key: impl Into<String>,
        provider: Resolvable<dyn ServiceProvider>,
    ) -> Self {
        self.providers.push((key.into(), provider));
        self
    }

    pub fn with_kernel(mut self, kernel: impl Kernel + 'static) -> Self {
        self.kernel = Some(Resolvable::instance(Arc::new(kernel)));
        self
    }

    pub fn with_kernel_source(mut self, kernel: Resolvable<dyn Kernel>) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn with_container(mut self, container: impl ServiceContainer + 'static) -> Self {
        self.container = Some(Resolvable::instance(Arc::new(container)));
        self
    }

    pub fn with_environment(
        mut self,
        key: impl Into<String>,
        source: impl EnvironmentSource + 'static,
    ) -> Self {
        self.environments
            .push((key.into(), Resolvable::instance(Arc::new(source))));
        self
    }

    pub fn with_configuration(mut self, key: impl Into<String>, value: Value) -> Self {
        self.configurations.push((key.into(), value));
        self
    }

    pub fn with_globals(mut self, globals: GlobalsOverride) -> Self {
        self.globals.merge(globals);
        self
    }

    pub fn with_auto_run(mut self, auto_run: bool) -> Self {
        self.auto_run = auto_run;
        self
    }

    pub fn with_scope(mut self, name: impl Into<String>, options: AppOptions) -> Self {
        self.scopes.insert(name.into(), options);
        self
    }

    /// Merge a start-time override into these options. List entries are
    /// appended (later entries win on key collision downstream); kernel,
    /// container and globals are replaced when set.
    pub(crate) fn merge(&mut self, other: AppOptions) {
        self.providers.extend(other.providers);
        if other.kernel.is_some() {
            self.kernel = other.kernel;
        }
        if other.container.is_some() {
            self.container = other.container;
        }
        self.environments.extend(other.environments);
        self.configurations.extend(other.configurations);
        self.globals.merge(other.globals);
        self.auto_run |= other.auto_run;
        self.scopes.extend(other.scopes);
    }
}
