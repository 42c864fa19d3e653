//! Telemetry service provider for Ignition applications.
//!
//! Binds a [`Telemetry`] counter service into the application container during
//! `register` and, during `boot`, subscribes to the lifecycle events emitted
//! after the provider phase, counting each occurrence and mirroring it to the
//! log facade.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use log::info;

use ignition_core::application::error::Result;
use ignition_core::container::Service;
use ignition_core::event::EventResult;
use ignition_core::{Application, ServiceProvider};

/// Namespace the telemetry service is bound under.
pub const TELEMETRY_NAMESPACE: &str = "telemetry";

/// Lifecycle events observable from a provider's `boot` hook onward.
const OBSERVED_EVENTS: &[&str] = &[
    "providersReady",
    "willInitializeKernel",
    "kernelReady",
    "applicationReady",
    "willRun",
    "willTerminate",
    "terminated",
    "error",
];

/// Named occurrence counters.
#[derive(Debug, Default)]
pub struct Telemetry {
    counts: RwLock<HashMap<String, u64>>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a named event
    pub fn record(&self, name: &str) {
        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Occurrences recorded under a name
    pub fn count(&self, name: &str) -> u64 {
        self.counts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Copy of all counters
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Service provider wiring [`Telemetry`] into an application.
#[derive(Debug, Default)]
pub struct TelemetryProvider;

#[async_trait]
impl ServiceProvider for TelemetryProvider {
    async fn register(&self, app: &Application) -> Result<()> {
        let container = app
            .container()
            .ok_or_else(|| ignition_core::AppError::from("container missing during register"))?;
        container.bind(TELEMETRY_NAMESPACE, Arc::new(Telemetry::new()) as Service);
        Ok(())
    }

    async fn boot(&self, app: &Application) -> Result<()> {
        let telemetry = app
            .use_handle()
            .resolve_as::<Telemetry>(TELEMETRY_NAMESPACE)?;
        for name in OBSERVED_EVENTS {
            let telemetry = Arc::clone(&telemetry);
            app.on_sync(name, move |event| {
                telemetry.record(event.name());
                info!("lifecycle event: {}", event.name());
                EventResult::Continue
            });
        }
        Ok(())
    }

    async fn terminate(&self, app: &Application) -> Result<()> {
        if let Ok(telemetry) = app
            .use_handle()
            .resolve_as::<Telemetry>(TELEMETRY_NAMESPACE)
        {
            for (name, count) in telemetry.snapshot() {
                info!("telemetry: {name} fired {count} time(s)");
            }
        }
        Ok(())
    }
}
