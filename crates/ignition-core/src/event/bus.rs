use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use crate::event::{Event, EventId, EventResult};

/// Owned future returned by asynchronous subscribers.
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = EventResult> + Send + 'a>>;

type AsyncHandler = Arc<dyn for<'a> Fn(&'a dyn Event) -> BoxFuture<'a> + Send + Sync>;
type SyncHandler = Arc<dyn Fn(&dyn Event) -> EventResult + Send + Sync>;

/// A registered subscriber. Synchronous subscribers are reachable from both
/// dispatch paths; asynchronous ones only from `emit`.
#[derive(Clone)]
enum Subscriber {
    Async(AsyncHandler),
    Sync(SyncHandler),
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscriber::Async(_) => f.debug_struct("Async").finish_non_exhaustive(),
            Subscriber::Sync(_) => f.debug_struct("Sync").finish_non_exhaustive(),
        }
    }
}

#[derive(Default)]
struct Registry {
    by_name: HashMap<String, Vec<(EventId, Subscriber)>>,
    by_type: HashMap<TypeId, Vec<(EventId, Subscriber)>>,
    next_id: EventId,
}

impl Registry {
    fn issue_id(&mut self) -> EventId {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared event bus keeping subscribers in registration order.
///
/// Subscribers are stored behind `Arc`s and collected out of the table before
/// invocation, so no lock is held while a handler runs or suspends.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<RwLock<Registry>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asynchronous subscriber for events with the given name.
    pub fn on<F>(&self, event_name: &str, handler: F) -> EventId
    where
        F: for<'a> Fn(&'a dyn Event) -> BoxFuture<'a> + Send + Sync + 'static,
    {
        let mut registry = self.write();
        let id = registry.issue_id();
        registry
            .by_name
            .entry(event_name.to_string())
            .or_default()
            .push((id, Subscriber::Async(Arc::new(handler))));
        id
    }

    /// Register a synchronous subscriber for events with the given name.
    pub fn on_sync<F>(&self, event_name: &str, handler: F) -> EventId
    where
        F: Fn(&dyn Event) -> EventResult + Send + Sync + 'static,
    {
        let mut registry = self.write();
        let id = registry.issue_id();
        registry
            .by_name
            .entry(event_name.to_string())
            .or_default()
            .push((id, Subscriber::Sync(Arc::new(handler))));
        id
    }

    /// Register a synchronous subscriber for events of a specific type.
    pub fn on_type<E, F>(&self, handler: F) -> EventId
    where
        E: Event + 'static,
        F: Fn(&E) -> EventResult + Send + Sync + 'static,
    {
        let typed = move |event: &dyn Event| match event.as_any().downcast_ref::<E>() {
            Some(event) => handler(event),
            None => EventResult::Continue,
        };
        let mut registry = self.write();
        let id = registry.issue_id();
        registry
            .by_type
            .entry(TypeId::of::<E>())
            .or_default()
            .push((id, Subscriber::Sync(Arc::new(typed))));
        id
    }

    /// Remove a subscriber by its id. Returns whether anything was removed.
    pub fn unsubscribe(&self, id: EventId) -> bool {
        let mut registry = self.write();
        let mut found = false;
        registry.by_name.values_mut().for_each(|subscribers| {
            let before = subscribers.len();
            subscribers.retain(|(s_id, _)| *s_id != id);
            found |= subscribers.len() < before;
        });
        registry.by_type.values_mut().for_each(|subscribers| {
            let before = subscribers.len();
            subscribers.retain(|(s_id, _)| *s_id != id);
            found |= subscribers.len() < before;
        });
        found
    }

    /// Number of subscribers registered under an event name.
    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.read()
            .by_name
            .get(event_name)
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }

    /// Dispatch an event, awaiting subscribers one at a time in registration
    /// order. Name subscribers run before type subscribers.
    pub async fn emit(&self, event: &dyn Event) -> EventResult {
        for subscriber in self.matching(event) {
            let result = match subscriber {
                Subscriber::Async(handler) => handler(event).await,
                Subscriber::Sync(handler) => handler(event),
            };
            if result == EventResult::Stop {
                return EventResult::Stop;
            }
        }
        EventResult::Continue
    }

    /// Dispatch an event without suspending. Only synchronous subscribers are
    /// invoked; asynchronous ones are skipped on this path.
    pub fn emit_sync(&self, event: &dyn Event) -> EventResult {
        for subscriber in self.matching(event) {
            if let Subscriber::Sync(handler) = subscriber {
                if handler(event) == EventResult::Stop {
                    return EventResult::Stop;
                }
            }
        }
        EventResult::Continue
    }

    fn matching(&self, event: &dyn Event) -> Vec<Subscriber> {
        let registry = self.read();
        let mut subscribers = Vec::new();
        if let Some(named) = registry.by_name.get(event.name()) {
            subscribers.extend(named.iter().map(|(_, s)| s.clone()));
        }
        if let Some(typed) = registry.by_type.get(&event.as_any().type_id()) {
            subscribers.extend(typed.iter().map(|(_, s)| s.clone()));
        }
        subscribers
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
