#![cfg(test)]

use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::application::bootstrap::Application;
use crate::application::options::AppOptions;
use crate::env::StaticEnv;
use crate::tests::integration::common::{ReportingKernel, StorageProvider, record_events};

#[tokio::test]
async fn test_full_boot_and_run() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let options = AppOptions::new()
        .with_provider(
            "storage",
            StorageProvider {
                log: Arc::clone(&log),
            },
        )
        .with_kernel(ReportingKernel)
        .with_configuration("storage", json!({"url": "postgres://localhost"}))
        .with_environment("static", StaticEnv::new().with("APP_MODE", "test"));

    let app = Application::new(options);
    let events = record_events(
        &app,
        &["willStart", "applicationReady", "willRun", "error"],
    );

    let value = app.run(None).await.expect("run should succeed");

    // The kernel observed the provider-bound service and the environment
    assert_eq!(value["storage"], "postgres://localhost");
    assert_eq!(value["mode"], "test");

    assert_eq!(
        *events.lock().unwrap(),
        vec!["willStart", "applicationReady", "willRun"]
    );
    assert_eq!(
        *log.lock().unwrap(),
        vec!["storage.register", "storage.boot"]
    );
}

#[tokio::test]
async fn test_run_after_start_does_not_restart() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let options = AppOptions::new()
        .with_provider(
            "storage",
            StorageProvider {
                log: Arc::clone(&log),
            },
        )
        .with_kernel(ReportingKernel);

    let app = Application::new(options);
    app.start(None).await.expect("start should succeed");
    app.run(None).await.expect("run should succeed");

    // Hooks ran once even though run followed an explicit start
    assert_eq!(
        *log.lock().unwrap(),
        vec!["storage.register", "storage.boot"]
    );
}

#[tokio::test]
async fn test_launch_boots_and_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let options = AppOptions::new()
        .with_provider(
            "storage",
            StorageProvider {
                log: Arc::clone(&log),
            },
        )
        .with_kernel(ReportingKernel);

    let value = Application::launch(options).await.expect("launch should succeed");
    assert_eq!(value["storage"], "memory://default");
}

#[tokio::test]
async fn test_terminate_releases_providers() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let options = AppOptions::new().with_provider(
        "storage",
        StorageProvider {
            log: Arc::clone(&log),
        },
    );

    let app = Application::new(options);
    app.start(None).await.expect("start should succeed");
    app.terminate().await.expect("terminate should succeed");

    assert_eq!(
        *log.lock().unwrap(),
        vec!["storage.register", "storage.boot", "storage.terminate"]
    );
}
