use std::sync::Arc;

use crate::env::{Environment, StaticEnv};

#[tokio::test]
async fn test_init_merges_sources_in_order() {
    let env = Environment::new();
    env.add_source(Arc::new(
        StaticEnv::new().with("SHARED", "first").with("ONLY_A", "a"),
    ));
    env.add_source(Arc::new(
        StaticEnv::new().with("SHARED", "second").with("ONLY_B", "b"),
    ));
    assert_eq!(env.source_count(), 2);

    env.init().await.expect("init should succeed");

    // Later sources override earlier keys
    assert_eq!(env.get("SHARED"), Some("second".to_string()));
    assert_eq!(env.get("ONLY_A"), Some("a".to_string()));
    assert_eq!(env.get("ONLY_B"), Some("b".to_string()));
}

#[test]
fn test_init_sync_matches_async_behavior() {
    let env = Environment::new();
    env.add_source(Arc::new(StaticEnv::new().with("KEY", "old")));
    env.add_source(Arc::new(StaticEnv::new().with("KEY", "new")));

    env.init_sync().expect("init_sync should succeed");
    assert_eq!(env.get("KEY"), Some("new".to_string()));
}

#[test]
fn test_get_or_and_has() {
    let env = Environment::new();
    env.add_source(Arc::new(StaticEnv::new().with("PRESENT", "yes")));
    env.init_sync().expect("init_sync should succeed");

    assert_eq!(env.get_or("PRESENT", "no"), "yes");
    assert_eq!(env.get_or("ABSENT", "no"), "no");
    assert!(env.has("PRESENT"));
    assert!(!env.has("ABSENT"));
}

#[test]
fn test_get_parsed() {
    let env = Environment::new();
    env.add_source(Arc::new(
        StaticEnv::new().with("PORT", "8080").with("NOT_A_NUMBER", "x"),
    ));
    env.init_sync().expect("init_sync should succeed");

    assert_eq!(env.get_parsed::<u16>("PORT"), Some(8080));
    assert_eq!(env.get_parsed::<u16>("NOT_A_NUMBER"), None);
    assert_eq!(env.get_parsed::<u16>("MISSING"), None);
}

#[test]
fn test_create_scope_copies_values_and_sources() {
    let parent = Environment::new();
    parent.add_source(Arc::new(StaticEnv::new().with("KEY", "value")));
    parent.init_sync().expect("init_sync should succeed");

    let child = parent.create_scope();
    // Values snapshot carried over without re-initializing
    assert_eq!(child.get("KEY"), Some("value".to_string()));
    assert_eq!(child.source_count(), 1);

    // New sources on the child do not leak to the parent
    child.add_source(Arc::new(StaticEnv::new().with("CHILD", "only")));
    child.init_sync().expect("init_sync should succeed");
    assert_eq!(child.get("CHILD"), Some("only".to_string()));
    assert_eq!(parent.source_count(), 1);
    assert!(!parent.has("CHILD"));
}
