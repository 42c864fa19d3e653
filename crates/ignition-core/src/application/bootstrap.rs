use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde_json::Value;

use crate::application::error::{AppError, ErrorReport, Result};
use crate::application::globals::{
    AmbientRegistry, AppHandle, ConfigAccessor, EnvAccessor, ServiceAccessor,
};
use crate::application::options::{AppOptions, Globals, GlobalsOverride, Resolvable};
use crate::application::scope::{ScopeHooks, ScopeOverrides};
use crate::config::Configuration;
use crate::container::{DefaultServiceContainer, ServiceContainer};
use crate::env::{Environment, EnvironmentSource};
use crate::event::bus::BoxFuture;
use crate::event::{Event, EventBus, EventId, EventResult, LifecycleEvent};
use crate::kernel::{Kernel, NullKernel};
use crate::provider::{self, ProviderHook, ProviderRegistry, ServiceProvider};

/// Shared slot holding the registered container, if any.
///
/// Accessors hold the slot rather than the container so a resolution
/// attempted before the container phase fails with the missing-container
/// error instead of capturing a stale `None`.
pub(crate) type ContainerSlot = Arc<RwLock<Option<Arc<dyn ServiceContainer>>>>;

/// Application lifecycle controller.
///
/// Drives the injected collaborators and the user-supplied providers and
/// kernel through a fixed ordered sequence of phases, emitting a lifecycle
/// event before and after each phase. The full start sequence runs at most
/// once per instance; `create_scope` derives child applications that inherit
/// providers, container bindings, configuration and environment snapshots.
pub struct Application {
    scope: ScopeHooks,
    options: RwLock<AppOptions>,
    globals: RwLock<Globals>,
    providers: RwLock<ProviderRegistry>,
    events: EventBus,
    container: ContainerSlot,
    configuration: Arc<Configuration>,
    environment: Arc<Environment>,
    kernel: RwLock<Option<Arc<dyn Kernel>>>,
    ambient: Arc<AmbientRegistry>,
    parent: Option<Arc<Application>>,
    self_ref: Weak<Application>,
    started: AtomicBool,
    terminated: AtomicBool,
}

impl Application {
    /// Create a root application with a private ambient registry
    pub fn new(options: AppOptions) -> Arc<Self> {
        Self::build(options, ScopeHooks::global_scope(), None, None)
    }

    /// Create a root application installing its accessors into the given
    /// ambient registry (for example [`AmbientRegistry::process`])
    pub fn with_ambient(options: AppOptions, ambient: Arc<AmbientRegistry>) -> Arc<Self> {
        Self::build(options, ScopeHooks::global_scope(), None, Some(ambient))
    }

    /// Create an application and immediately run it
    pub async fn launch(options: AppOptions) -> std::result::Result<Value, ErrorReport> {
        Self::new(options).run(None).await
    }

    fn build(
        options: AppOptions,
        scope: ScopeHooks,
        parent: Option<Arc<Application>>,
        ambient: Option<Arc<AmbientRegistry>>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| {
            let configuration = match &parent {
                Some(parent) => Arc::new(parent.configuration.create_scope()),
                None => Arc::new(Configuration::new()),
            };
            let environment = match &parent {
                Some(parent) => Arc::new(parent.environment.create_scope()),
                None => Arc::new(Environment::new()),
            };
            // Copy-on-derive: a child starts from a snapshot of the parent's
            // bindings and never mutates them.
            let container = match &parent {
                Some(parent) => Arc::new(RwLock::new(
                    parent.container().map(|c| c.clone_container()),
                )),
                None => Arc::new(RwLock::new(None)),
            };
            let ambient = ambient
                .or_else(|| parent.as_ref().map(|parent| parent.ambient.clone()))
                .unwrap_or_else(|| Arc::new(AmbientRegistry::new()));

            Application {
                scope,
                options: RwLock::new(options),
                globals: RwLock::new(Globals::default()),
                providers: RwLock::new(ProviderRegistry::new()),
                events: EventBus::new(),
                container,
                configuration,
                environment,
                kernel: RwLock::new(None),
                ambient,
                parent,
                self_ref: self_ref.clone(),
                started: AtomicBool::new(false),
                terminated: AtomicBool::new(false),
            }
        })
    }

    /// Execute the start sequence. Idempotent: calls after the first return
    /// immediately without emitting events.
    pub async fn start(&self, overrides: Option<AppOptions>) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        log::info!("starting application scope '{}'", self.scope.name);
        self.events.emit(&LifecycleEvent::WillStart).await;

        if let Some(overrides) = overrides {
            self.write_options().merge(overrides);
        }

        // Snapshot everything the phases consume so no lock outlives an await
        let (provider_entries, globals_override, container_source, environments, configurations, kernel_source) = {
            let options = self.read_options();
            (
                options.providers.clone(),
                options.globals,
                options.container.clone(),
                options.environments.clone(),
                options.configurations.clone(),
                options.kernel.clone(),
            )
        };

        self.instantiate_providers(&provider_entries);
        self.initialize_globals(globals_override).await?;

        self.events.emit(&LifecycleEvent::WillInitializeContainer).await;
        self.initialize_container(container_source);
        self.events.emit(&LifecycleEvent::ContainerReady).await;

        self.events.emit(&LifecycleEvent::WillInitializeEnvironments).await;
        self.initialize_environment(environments).await?;
        self.events.emit(&LifecycleEvent::EnvironmentsReady).await;

        self.events.emit(&LifecycleEvent::WillInitializeConfigurations).await;
        self.initialize_configurations(configurations).await?;
        self.events.emit(&LifecycleEvent::ConfigurationsReady).await;

        self.events.emit(&LifecycleEvent::WillInitializeProviders).await;
        let entries = self.provider_entries();
        for hook in &self.scope.provider {
            self.run_hook(*hook, &entries).await?;
        }
        self.events
            .emit(&LifecycleEvent::ProvidersReady {
                count: entries.len(),
            })
            .await;

        self.events.emit(&LifecycleEvent::WillInitializeKernel).await;
        self.initialize_kernel(kernel_source).await?;
        self.events.emit(&LifecycleEvent::KernelReady).await;

        self.events.emit(&LifecycleEvent::ApplicationReady).await;
        log::info!("application scope '{}' ready", self.scope.name);
        Ok(())
    }

    /// Start the application and invoke the kernel's `run` hook.
    ///
    /// Any failure is normalized, broadcast synchronously on the `error`
    /// channel, and returned; `start` by contrast propagates raw errors.
    pub async fn run(&self, overrides: Option<AppOptions>) -> std::result::Result<Value, ErrorReport> {
        match self.try_run(overrides).await {
            Ok(value) => Ok(value),
            Err(error) => {
                let report = ErrorReport::normalize(&error);
                log::error!("application run failed: {report}");
                self.events
                    .emit_sync(&LifecycleEvent::ErrorRaised(report.clone()));
                Err(report)
            }
        }
    }

    async fn try_run(&self, overrides: Option<AppOptions>) -> Result<Value> {
        self.start(overrides).await?;
        self.events.emit(&LifecycleEvent::WillRun).await;
        let kernel = self
            .kernel()
            .ok_or_else(|| AppError::Other("kernel not initialized".to_string()))?;
        kernel.run(self).await.map_err(|source| AppError::Kernel {
            hook: "run",
            source: Box::new(source),
        })
    }

    /// Resolve and register additional providers, then run the scope's
    /// provider hooks over the new instances only; every `register` pass
    /// completes before any `boot` pass begins.
    pub async fn initialize_providers(
        &self,
        entries: Vec<(String, Resolvable<dyn ServiceProvider>)>,
    ) -> Result<()> {
        let fresh = self.instantiate_providers(&entries);
        for hook in &self.scope.provider {
            self.run_hook(*hook, &fresh).await?;
        }
        Ok(())
    }

    /// Derive a child application from the named sub-configuration.
    ///
    /// The child inherits this instance's providers (read-only), a clone of
    /// its container bindings, and snapshots of its configuration and
    /// environment stores. Child hook lists default to empty unless
    /// overridden. If the sub-configuration sets `auto_run`, the child is run
    /// before being returned.
    pub async fn create_scope(
        self: &Arc<Self>,
        name: &str,
        overrides: Option<ScopeOverrides>,
    ) -> Result<Arc<Application>> {
        let scope_options = self
            .read_options()
            .scopes
            .get(name)
            .cloned()
            .unwrap_or_default();
        let auto_run = scope_options.auto_run;
        let hooks = ScopeHooks::named(name).with_overrides(overrides.unwrap_or_default());
        log::debug!("creating scope '{name}'");
        let child = Self::build(scope_options, hooks, Some(self.clone()), None);
        if auto_run {
            child.run(None).await.map_err(|report| AppError::Scope {
                name: name.to_string(),
                source: Box::new(AppError::Runtime(report)),
            })?;
        }
        Ok(child)
    }

    /// Tear the application down. Repeated calls are no-ops.
    pub async fn terminate(&self) -> Result<()> {
        if self.terminated.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        log::info!("terminating application scope '{}'", self.scope.name);
        self.events.emit(&LifecycleEvent::WillTerminate).await;
        if let Some(kernel) = self.kernel() {
            kernel
                .terminate(self)
                .await
                .map_err(|source| AppError::Kernel {
                    hook: "terminate",
                    source: Box::new(source),
                })?;
        }
        let entries = self.provider_entries();
        for hook in &self.scope.terminate {
            self.run_hook(*hook, &entries).await?;
        }
        self.events.emit(&LifecycleEvent::Terminated).await;
        Ok(())
    }

    //--------------------------------------------------
    // Phase internals
    //--------------------------------------------------

    fn instantiate_providers(
        &self,
        entries: &[(String, Resolvable<dyn ServiceProvider>)],
    ) -> Vec<(String, Arc<dyn ServiceProvider>)> {
        let mut registry = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        let mut fresh = Vec::with_capacity(entries.len());
        for (key, source) in entries {
            let provider = source.resolve();
            registry.insert(key.clone(), provider.clone());
            fresh.push((key.clone(), provider));
        }
        fresh
    }

    async fn initialize_globals(&self, overrides: GlobalsOverride) -> Result<()> {
        self.globals
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(&overrides);

        let entries = self.provider_entries();
        for hook in &self.scope.global {
            self.run_hook(*hook, &entries).await?;
        }

        let policy = self.globals();
        if policy.services {
            self.ambient.set_services_if_absent(self.use_handle());
        }
        if policy.env {
            self.ambient.set_env_if_absent(self.env_handle());
        }
        if policy.config {
            self.ambient.set_config_if_absent(self.config_handle());
        }
        if policy.app {
            self.ambient
                .set_app_if_absent(AppHandle::new(self.self_ref.clone()));
        }
        Ok(())
    }

    fn initialize_container(&self, source: Option<Resolvable<dyn ServiceContainer>>) {
        let container: Arc<dyn ServiceContainer> = match source {
            Some(source) => source.resolve(),
            None => match self.parent.as_ref().and_then(|parent| parent.container()) {
                Some(parent_container) => parent_container.clone_container(),
                None => Arc::new(DefaultServiceContainer::new()),
            },
        };
        *self
            .container
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(container);
    }

    async fn initialize_environment(
        &self,
        entries: Vec<(String, Resolvable<dyn EnvironmentSource>)>,
    ) -> Result<()> {
        for (name, source) in entries {
            log::debug!("registering environment source '{name}'");
            self.environment.add_source(source.resolve());
        }
        self.environment.init().await?;

        let providers = self.provider_entries();
        for hook in &self.scope.environment {
            self.run_hook(*hook, &providers).await?;
        }
        Ok(())
    }

    async fn initialize_configurations(&self, entries: Vec<(String, Value)>) -> Result<()> {
        for (key, value) in entries {
            self.configuration.set(&key, value)?;
        }
        let providers = self.provider_entries();
        for hook in &self.scope.configuration {
            self.run_hook(*hook, &providers).await?;
        }
        Ok(())
    }

    async fn initialize_kernel(&self, source: Option<Resolvable<dyn Kernel>>) -> Result<()> {
        let kernel: Arc<dyn Kernel> = match source {
            Some(source) => source.resolve(),
            None => Arc::new(NullKernel),
        };
        *self.kernel.write().unwrap_or_else(PoisonError::into_inner) = Some(kernel.clone());
        kernel.boot(self).await.map_err(|source| AppError::Kernel {
            hook: "boot",
            source: Box::new(source),
        })
    }

    /// Run one hook over a provider list, awaiting each provider in order.
    async fn run_hook(
        &self,
        hook: ProviderHook,
        providers: &[(String, Arc<dyn ServiceProvider>)],
    ) -> Result<()> {
        for (name, provider) in providers {
            log::debug!("running {hook} hook for provider '{name}'");
            provider::dispatch(provider.as_ref(), hook, self)
                .await
                .map_err(|source| AppError::Provider {
                    name: name.clone(),
                    hook,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    //--------------------------------------------------
    // Accessors
    //--------------------------------------------------

    /// Name of this application's scope (`"global"` for the root)
    pub fn scope_name(&self) -> &str {
        &self.scope.name
    }

    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn has_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.environment
    }

    /// The registered container, if the container phase has run (or a parent
    /// seeded this scope)
    pub fn container(&self) -> Option<Arc<dyn ServiceContainer>> {
        self.container
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kernel(&self) -> Option<Arc<dyn Kernel>> {
        self.kernel
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn parent(&self) -> Option<&Arc<Application>> {
        self.parent.as_ref()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn ambient(&self) -> &Arc<AmbientRegistry> {
        &self.ambient
    }

    /// Active ambient accessor policy
    pub fn globals(&self) -> Globals {
        *self.globals.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inherited and own providers, in hook execution order
    pub fn service_providers(&self) -> Vec<Arc<dyn ServiceProvider>> {
        self.provider_entries()
            .into_iter()
            .map(|(_, provider)| provider)
            .collect()
    }

    fn provider_entries(&self) -> Vec<(String, Arc<dyn ServiceProvider>)> {
        let mut entries = match &self.parent {
            Some(parent) => parent.provider_entries(),
            None => Vec::new(),
        };
        entries.extend(
            self.providers
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .entries(),
        );
        entries
    }

    /// Service accessor bound to this application's container slot
    pub fn use_handle(&self) -> ServiceAccessor {
        ServiceAccessor::new(self.container.clone())
    }

    /// Environment accessor bound to this application's environment store
    pub fn env_handle(&self) -> EnvAccessor {
        EnvAccessor::new(self.environment.clone())
    }

    /// Configuration accessor bound to this application's configuration store
    pub fn config_handle(&self) -> ConfigAccessor {
        ConfigAccessor::new(self.configuration.clone())
    }

    //--------------------------------------------------
    // Event pass-throughs
    //--------------------------------------------------

    pub fn on<F>(&self, event_name: &str, handler: F) -> EventId
    where
        F: for<'a> Fn(&'a dyn Event) -> BoxFuture<'a> + Send + Sync + 'static,
    {
        self.events.on(event_name, handler)
    }

    pub fn on_sync<F>(&self, event_name: &str, handler: F) -> EventId
    where
        F: Fn(&dyn Event) -> EventResult + Send + Sync + 'static,
    {
        self.events.on_sync(event_name, handler)
    }

    pub async fn emit(&self, event: &dyn Event) -> EventResult {
        self.events.emit(event).await
    }

    fn read_options(&self) -> std::sync::RwLockReadGuard<'_, AppOptions> {
        self.options.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_options(&self) -> std::sync::RwLockWriteGuard<'_, AppOptions> {
        self.options.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("scope", &self.scope.name)
            .field("started", &self.has_started())
            .field("terminated", &self.has_terminated())
            .finish_non_exhaustive()
    }
}
