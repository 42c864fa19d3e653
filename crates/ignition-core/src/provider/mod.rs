//! # Ignition Core Service Providers
//!
//! Service providers are the extension units of the framework. A provider
//! exposes optional lifecycle hooks; the application controller invokes the
//! subset selected by the active scope's hook lists, one provider at a time
//! in registration order.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Provider contract**: the [`ServiceProvider`] trait: nine optional
//!   hooks, all defaulting to no-ops, each receiving the owning (or scoped)
//!   [`Application`].
//! - **Hook naming**: the [`ProviderHook`] enum, used by scope hook lists and
//!   error context.
//! - **Registry**: the [`ProviderRegistry`](registry::ProviderRegistry),
//!   insertion-ordered and keyed by name; re-registering a key overwrites the
//!   provider while keeping its position.
pub mod registry;

use std::fmt;

use async_trait::async_trait;

use crate::application::bootstrap::Application;
use crate::application::error::Result;

/// A unit exposing optional lifecycle hooks invoked by the controller.
///
/// Every hook defaults to a no-op; implement only the phases the provider
/// participates in. Hooks run one provider at a time, so a hook may rely on
/// the effects of hooks that ran before it in the same pass.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// Bind services into the container
    async fn register(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    /// Use services; runs only after every provider's `register` completed
    async fn boot(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn register_global(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn boot_global(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn register_environment(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn boot_environment(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn register_configuration(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn boot_configuration(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    /// Teardown, invoked by `Application::terminate`
    async fn terminate(&self, _app: &Application) -> Result<()> {
        Ok(())
    }
}

/// Names of the provider hooks, as referenced by scope hook lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderHook {
    Register,
    Boot,
    RegisterGlobal,
    BootGlobal,
    RegisterEnvironment,
    BootEnvironment,
    RegisterConfiguration,
    BootConfiguration,
    Terminate,
}

impl ProviderHook {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderHook::Register => "register",
            ProviderHook::Boot => "boot",
            ProviderHook::RegisterGlobal => "registerGlobal",
            ProviderHook::BootGlobal => "bootGlobal",
            ProviderHook::RegisterEnvironment => "registerEnvironment",
            ProviderHook::BootEnvironment => "bootEnvironment",
            ProviderHook::RegisterConfiguration => "registerConfiguration",
            ProviderHook::BootConfiguration => "bootConfiguration",
            ProviderHook::Terminate => "terminate",
        }
    }
}

impl fmt::Display for ProviderHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invoke one named hook on one provider.
pub(crate) async fn dispatch(
    provider: &dyn ServiceProvider,
    hook: ProviderHook,
    app: &Application,
) -> Result<()> {
    match hook {
        ProviderHook::Register => provider.register(app).await,
        ProviderHook::Boot => provider.boot(app).await,
        ProviderHook::RegisterGlobal => provider.register_global(app).await,
        ProviderHook::BootGlobal => provider.boot_global(app).await,
        ProviderHook::RegisterEnvironment => provider.register_environment(app).await,
        ProviderHook::BootEnvironment => provider.boot_environment(app).await,
        ProviderHook::RegisterConfiguration => provider.register_configuration(app).await,
        ProviderHook::BootConfiguration => provider.boot_configuration(app).await,
        ProviderHook::Terminate => provider.terminate(app).await,
    }
}

pub use registry::ProviderRegistry;

// Test module declaration
#[cfg(test)]
mod tests;
