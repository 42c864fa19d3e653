use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::event::{Event, EventBus, EventResult};

// Test event implementation
#[derive(Debug, Clone)]
struct TestEvent {
    name: &'static str,
    data: String,
}

impl TestEvent {
    fn new(name: &'static str, data: &str) -> Self {
        Self {
            name,
            data: data.to_string(),
        }
    }
}

impl Event for TestEvent {
    fn name(&self) -> &'static str {
        self.name
    }

    fn clone_event(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[tokio::test]
async fn test_sync_subscriber_registration_and_dispatch() {
    let bus = EventBus::new();
    let counter = Arc::new(AtomicU32::new(0));

    let counter_clone = Arc::clone(&counter);
    let id = bus.on_sync("test.event", move |event| {
        assert_eq!(event.name(), "test.event");
        counter_clone.fetch_add(1, Ordering::SeqCst);
        EventResult::Continue
    });
    assert!(id > 0, "subscription id should be positive");

    let event = TestEvent::new("test.event", "test data");
    let result = bus.emit(&event).await;
    assert_eq!(result, EventResult::Continue);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    // A different event name should not trigger the subscriber
    let other = TestEvent::new("other.event", "other data");
    bus.emit(&other).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_async_subscriber_dispatch() {
    let bus = EventBus::new();
    let counter = Arc::new(AtomicU32::new(0));

    let counter_clone = Arc::clone(&counter);
    bus.on("test.event", move |_event| {
        let counter = Arc::clone(&counter_clone);
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            EventResult::Continue
        })
    });

    let event = TestEvent::new("test.event", "payload");
    bus.emit(&event).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_subscribers_run_in_registration_order() {
    let bus = EventBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    for label in ["first", "second", "third"] {
        let log_clone = Arc::clone(&log);
        bus.on_sync("ordered", move |_event| {
            log_clone.lock().unwrap().push(label);
            EventResult::Continue
        });
    }

    bus.emit(&TestEvent::new("ordered", "")).await;
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_stop_halts_propagation() {
    let bus = EventBus::new();
    let counter = Arc::new(AtomicU32::new(0));

    bus.on_sync("halt", |_event| EventResult::Stop);
    let counter_clone = Arc::clone(&counter);
    bus.on_sync("halt", move |_event| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        EventResult::Continue
    });

    let result = bus.emit(&TestEvent::new("halt", "")).await;
    assert_eq!(result, EventResult::Stop);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_emit_sync_skips_async_subscribers() {
    let bus = EventBus::new();
    let sync_counter = Arc::new(AtomicU32::new(0));
    let async_counter = Arc::new(AtomicU32::new(0));

    let sync_clone = Arc::clone(&sync_counter);
    bus.on_sync("mixed", move |_event| {
        sync_clone.fetch_add(1, Ordering::SeqCst);
        EventResult::Continue
    });
    let async_clone = Arc::clone(&async_counter);
    bus.on("mixed", move |_event| {
        let counter = Arc::clone(&async_clone);
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            EventResult::Continue
        })
    });

    bus.emit_sync(&TestEvent::new("mixed", ""));
    assert_eq!(sync_counter.load(Ordering::SeqCst), 1);
    assert_eq!(async_counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_typed_subscriber_dispatch() {
    let bus = EventBus::new();
    let recorded = Arc::new(Mutex::new(String::new()));

    let recorded_clone = Arc::clone(&recorded);
    bus.on_type::<TestEvent, _>(move |event| {
        *recorded_clone.lock().unwrap() = event.data.clone();
        EventResult::Continue
    });

    bus.emit(&TestEvent::new("typed", "typed data")).await;
    assert_eq!(*recorded.lock().unwrap(), "typed data");

    // An event of a different type should not trigger the typed subscriber
    #[derive(Debug, Clone)]
    struct AnotherEvent;
    impl Event for AnotherEvent {
        fn name(&self) -> &'static str {
            "another.event"
        }
        fn clone_event(&self) -> Box<dyn Event> {
            Box::new(self.clone())
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }
    bus.emit(&AnotherEvent).await;
    assert_eq!(*recorded.lock().unwrap(), "typed data");
}

#[tokio::test]
async fn test_unsubscribe() {
    let bus = EventBus::new();
    let counter = Arc::new(AtomicU32::new(0));

    let counter_clone = Arc::clone(&counter);
    let id = bus.on_sync("gone", move |_event| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        EventResult::Continue
    });
    assert_eq!(bus.subscriber_count("gone"), 1);

    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id), "second removal should find nothing");
    assert_eq!(bus.subscriber_count("gone"), 0);

    bus.emit(&TestEvent::new("gone", "")).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}
