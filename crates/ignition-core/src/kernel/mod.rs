//! # Ignition Core Kernel
//!
//! The kernel is the user-supplied entry point invoked once every other
//! bootstrap phase has completed. All of its hooks are optional; an
//! application started without a kernel gets the no-op [`NullKernel`].
use async_trait::async_trait;
use serde_json::Value;

use crate::application::bootstrap::Application;
use crate::application::error::Result;

/// User-supplied entry point driven by the application controller.
#[async_trait]
pub trait Kernel: Send + Sync {
    /// Invoked during the kernel phase of `start`
    async fn boot(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    /// Main entry point; the returned value is handed back from
    /// `Application::run`.
    async fn run(&self, _app: &Application) -> Result<Value> {
        Ok(Value::Null)
    }

    /// Invoked by `Application::terminate` before provider teardown hooks
    async fn terminate(&self, _app: &Application) -> Result<()> {
        Ok(())
    }
}

/// Kernel used when an application is started without one configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullKernel;

#[async_trait]
impl Kernel for NullKernel {}
