#![cfg(test)]

use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::application::bootstrap::Application;
use crate::application::options::AppOptions;
use crate::application::scope::ScopeOverrides;
use crate::tests::integration::common::{ReportingKernel, StorageProvider};

#[tokio::test]
async fn test_scope_reuses_parent_bindings_through_kernel() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let options = AppOptions::new()
        .with_provider(
            "storage",
            StorageProvider {
                log: Arc::clone(&log),
            },
        )
        .with_configuration("storage", json!({"url": "postgres://primary"}))
        .with_scope("worker", AppOptions::new().with_kernel(ReportingKernel));

    let parent = Application::new(options);
    parent.start(None).await.expect("parent start should succeed");

    let child = parent
        .create_scope("worker", None)
        .await
        .expect("scope creation should succeed");
    let value = child.run(None).await.expect("child run should succeed");

    // The child kernel resolved the binding cloned from the parent container
    assert_eq!(value["storage"], "postgres://primary");
}

#[tokio::test]
async fn test_scope_with_full_hook_set_reruns_providers() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let options = AppOptions::new().with_provider(
        "storage",
        StorageProvider {
            log: Arc::clone(&log),
        },
    );

    let parent = Application::new(options);
    parent.start(None).await.expect("parent start should succeed");
    log.lock().unwrap().clear();

    let child = parent
        .create_scope("rerun", Some(ScopeOverrides::full()))
        .await
        .expect("scope creation should succeed");
    child.start(None).await.expect("child start should succeed");

    // The inherited provider went through register and boot again, this time
    // against the child scope
    assert_eq!(
        *log.lock().unwrap(),
        vec!["storage.register", "storage.boot"]
    );
}

#[tokio::test]
async fn test_nested_scope_chain() {
    let parent = Application::new(
        AppOptions::new().with_configuration("level", json!("root")),
    );
    parent.start(None).await.expect("parent start should succeed");

    let child = parent
        .create_scope("middle", None)
        .await
        .expect("scope creation should succeed");
    child
        .configuration()
        .set("level", json!("middle"))
        .expect("set should succeed");

    let grandchild = child
        .create_scope("leaf", None)
        .await
        .expect("scope creation should succeed");

    // Each scope derived a snapshot of the configuration above it
    assert_eq!(
        grandchild.config_handle().get::<String>("level"),
        Some("middle".to_string())
    );
    assert_eq!(
        parent.config_handle().get::<String>("level"),
        Some("root".to_string())
    );
}
