#![cfg(test)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::bootstrap::Application;
use crate::application::error::{AppError, Result};
use crate::container::Service;
use crate::event::EventResult;
use crate::kernel::Kernel;
use crate::provider::ServiceProvider;

// ===== SHARED FIXTURES =====

/// Provider that exercises the full hook surface: binds a repository during
/// `register`, reads configuration during `boot`, and releases during
/// `terminate`, recording every step.
pub struct StorageProvider {
    pub log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ServiceProvider for StorageProvider {
    async fn register(&self, app: &Application) -> Result<()> {
        let container = app.container().expect("container ready before providers");
        let url = app
            .config_handle()
            .get_or("storage.url", "memory://default".to_string());
        container.bind("storage.url", Arc::new(url) as Service);
        self.log.lock().unwrap().push("storage.register".to_string());
        Ok(())
    }

    async fn boot(&self, app: &Application) -> Result<()> {
        // register has completed for every provider by the time boot runs
        assert!(app.container().expect("container").has("storage.url"));
        self.log.lock().unwrap().push("storage.boot".to_string());
        Ok(())
    }

    async fn terminate(&self, _app: &Application) -> Result<()> {
        self.log.lock().unwrap().push("storage.terminate".to_string());
        Ok(())
    }
}

/// Kernel resolving the service bound by [`StorageProvider`] and echoing it
/// together with an environment variable.
pub struct ReportingKernel;

#[async_trait]
impl Kernel for ReportingKernel {
    async fn boot(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    async fn run(&self, app: &Application) -> Result<Value> {
        let url = app
            .use_handle()
            .resolve_as::<String>("storage.url")
            .map_err(AppError::from)?;
        Ok(json!({
            "storage": *url,
            "mode": app.env_handle().get_or("APP_MODE", "unset"),
        }))
    }

    async fn terminate(&self, _app: &Application) -> Result<()> {
        Ok(())
    }
}

/// Subscribe a recorder for the given event names, pushing each occurrence
/// into the returned log.
pub fn record_events(app: &Application, names: &[&'static str]) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in names {
        let log_clone = Arc::clone(&log);
        app.on_sync(name, move |event| {
            log_clone.lock().unwrap().push(event.name().to_string());
            EventResult::Continue
        });
    }
    log
}
