use std::sync::Arc;

use serde_json::Value;

use crate::application::bootstrap::Application;
use crate::application::error::{AppError, ErrorReport, Result};
use crate::application::options::{AppOptions, Resolvable};
use crate::application::scope::ScopeOverrides;
use crate::provider::ServiceProvider;

/// Blocking facade over [`Application`] for callers without an async runtime.
///
/// The lifecycle machine is implemented once, in asynchronous form; this
/// facade owns a current-thread tokio runtime and blocks on the inner
/// controller, so phase ordering is identical to the asynchronous path by
/// construction.
#[derive(Debug)]
pub struct SyncApplication {
    runtime: tokio::runtime::Runtime,
    inner: Arc<Application>,
}

impl SyncApplication {
    pub fn new(options: AppOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| AppError::Other(format!("failed to build blocking runtime: {e}")))?;
        Ok(Self {
            runtime,
            inner: Application::new(options),
        })
    }

    /// Execute the start sequence, blocking until it completes
    pub fn start(&self, overrides: Option<AppOptions>) -> Result<()> {
        self.runtime.block_on(self.inner.start(overrides))
    }

    /// Start and invoke the kernel's `run` hook, blocking until it returns
    pub fn run(&self, overrides: Option<AppOptions>) -> std::result::Result<Value, ErrorReport> {
        self.runtime.block_on(self.inner.run(overrides))
    }

    /// Register additional providers and run their provider hooks
    pub fn initialize_providers(
        &self,
        entries: Vec<(String, Resolvable<dyn ServiceProvider>)>,
    ) -> Result<()> {
        self.runtime.block_on(self.inner.initialize_providers(entries))
    }

    /// Derive a child scope; the child is an asynchronous application
    pub fn create_scope(
        &self,
        name: &str,
        overrides: Option<ScopeOverrides>,
    ) -> Result<Arc<Application>> {
        self.runtime.block_on(self.inner.create_scope(name, overrides))
    }

    /// Tear the application down, blocking until teardown hooks complete
    pub fn terminate(&self) -> Result<()> {
        self.runtime.block_on(self.inner.terminate())
    }

    /// The wrapped asynchronous application
    pub fn application(&self) -> &Arc<Application> {
        &self.inner
    }
}
