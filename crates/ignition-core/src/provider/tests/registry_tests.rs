use std::sync::Arc;

use crate::provider::{ProviderHook, ProviderRegistry, ServiceProvider};

struct MarkerProvider;

impl ServiceProvider for MarkerProvider {}

fn marker() -> Arc<dyn ServiceProvider> {
    Arc::new(MarkerProvider)
}

#[test]
fn test_insert_preserves_order() {
    let mut registry = ProviderRegistry::new();
    assert!(registry.insert("alpha", marker()));
    assert!(registry.insert("beta", marker()));
    assert!(registry.insert("gamma", marker()));

    assert_eq!(registry.keys(), &["alpha", "beta", "gamma"]);
    assert_eq!(registry.len(), 3);
    assert!(!registry.is_empty());
}

#[test]
fn test_reinsert_overwrites_in_place() {
    let mut registry = ProviderRegistry::new();
    registry.insert("alpha", marker());
    registry.insert("beta", marker());

    let replacement = marker();
    assert!(
        !registry.insert("alpha", replacement.clone()),
        "existing key should report as not new"
    );

    // Position unchanged, provider replaced
    assert_eq!(registry.keys(), &["alpha", "beta"]);
    let resolved = registry.get("alpha").expect("alpha should be present");
    assert!(Arc::ptr_eq(&resolved, &replacement));
}

#[test]
fn test_entries_follow_insertion_order() {
    let mut registry = ProviderRegistry::new();
    registry.insert("first", marker());
    registry.insert("second", marker());

    let keys: Vec<String> = registry.entries().into_iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(registry.providers().len(), 2);
}

#[test]
fn test_contains_and_get() {
    let mut registry = ProviderRegistry::new();
    registry.insert("present", marker());

    assert!(registry.contains("present"));
    assert!(!registry.contains("absent"));
    assert!(registry.get("absent").is_none());
}

#[test]
fn test_hook_names() {
    assert_eq!(ProviderHook::Register.name(), "register");
    assert_eq!(ProviderHook::Boot.name(), "boot");
    assert_eq!(ProviderHook::RegisterGlobal.name(), "registerGlobal");
    assert_eq!(ProviderHook::BootGlobal.name(), "bootGlobal");
    assert_eq!(
        ProviderHook::RegisterEnvironment.name(),
        "registerEnvironment"
    );
    assert_eq!(ProviderHook::BootEnvironment.name(), "bootEnvironment");
    assert_eq!(
        ProviderHook::RegisterConfiguration.name(),
        "registerConfiguration"
    );
    assert_eq!(ProviderHook::BootConfiguration.name(), "bootConfiguration");
    assert_eq!(ProviderHook::Terminate.name(), "terminate");
    assert_eq!(ProviderHook::Boot.to_string(), "boot");
}
