use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::container::{DefaultServiceContainer, Service, ServiceContainer};

#[derive(Debug, PartialEq)]
struct Greeter {
    greeting: String,
}

fn greeter(greeting: &str) -> Service {
    Arc::new(Greeter {
        greeting: greeting.to_string(),
    })
}

#[test]
fn test_bind_and_resolve() {
    let container = DefaultServiceContainer::new();
    container.bind("greeter", greeter("hello"));

    assert!(container.has("greeter"));
    assert!(!container.has("missing"));
    assert!(container.resolve("missing").is_none());

    let service = container.resolve("greeter").expect("bound service");
    let concrete = service
        .downcast::<Greeter>()
        .ok()
        .expect("downcast to Greeter");
    assert_eq!(concrete.greeting, "hello");
}

#[test]
fn test_resolve_as_on_trait_object() {
    let container: Arc<dyn ServiceContainer> = Arc::new(DefaultServiceContainer::new());
    container.bind("greeter", greeter("hi"));

    let concrete = container
        .resolve_as::<Greeter>("greeter")
        .expect("typed resolution");
    assert_eq!(concrete.greeting, "hi");

    // Wrong type yields None
    assert!(container.resolve_as::<String>("greeter").is_none());
}

#[test]
fn test_factory_rebuilds_per_resolution() {
    let container = DefaultServiceContainer::new();
    let built = Arc::new(AtomicU32::new(0));
    let built_clone = Arc::clone(&built);
    container.factory(
        "counter",
        Arc::new(move || {
            built_clone.fetch_add(1, Ordering::SeqCst);
            Arc::new(()) as Service
        }),
    );

    container.resolve("counter");
    container.resolve("counter");
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[test]
fn test_singleton_builds_once() {
    let container = DefaultServiceContainer::new();
    let built = Arc::new(AtomicU32::new(0));
    let built_clone = Arc::clone(&built);
    container.singleton(
        "counter",
        Arc::new(move || {
            built_clone.fetch_add(1, Ordering::SeqCst);
            Arc::new(()) as Service
        }),
    );

    let first = container.resolve("counter").expect("singleton resolves");
    let second = container.resolve("counter").expect("singleton resolves");
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_forget() {
    let container = DefaultServiceContainer::new();
    container.bind("gone", greeter("bye"));

    assert!(container.forget("gone"));
    assert!(!container.forget("gone"));
    assert!(!container.has("gone"));
}

#[test]
fn test_clone_container_is_independent() {
    let original = DefaultServiceContainer::new();
    original.bind("shared", greeter("hello"));

    let copy = original.clone_container();
    assert!(copy.has("shared"));

    copy.bind("copy-only", greeter("hi"));
    original.bind("original-only", greeter("hey"));

    assert!(!original.has("copy-only"));
    assert!(!copy.has("original-only"));

    // The shared binding points at the same instance (shallow copy)
    let a = original.resolve("shared").expect("bound");
    let b = copy.resolve("shared").expect("bound");
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_namespaces() {
    let container = DefaultServiceContainer::new();
    container.bind("a", greeter("a"));
    container.bind("b", greeter("b"));

    let mut namespaces = container.namespaces();
    namespaces.sort();
    assert_eq!(namespaces, vec!["a".to_string(), "b".to_string()]);
}
