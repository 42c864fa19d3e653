//! # Ignition Core Event System
//!
//! Lifecycle eventing for the bootstrap sequence. The controller owns an
//! [`EventBus`] by composition and re-exposes `on`/`emit` pass-throughs;
//! nothing in the crate inherits emitter behavior.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Event contract**: the [`Event`] trait identifies an event by a wire
//!   name and supports downcasting for typed subscribers.
//! - **Subscription & dispatch**: the [`EventBus`](bus::EventBus) keeps
//!   subscribers in registration order, awaits them one at a time on the
//!   asynchronous path, and offers a synchronous path for channels that must
//!   not suspend (the `error` channel).
//! - **Lifecycle events**: [`LifecycleEvent`](types::LifecycleEvent) carries
//!   the fixed set of wire names emitted by the application controller.
pub mod bus;
pub mod types;

use std::any::Any;
use std::fmt;

/// Type for subscription identifiers
pub type EventId = u64;

/// Result of event processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was processed and propagation should continue
    Continue,
    /// Event was processed and propagation should stop
    Stop,
}

/// Core event trait
pub trait Event: Any + fmt::Debug + Send + Sync {
    /// Wire name of this event
    fn name(&self) -> &'static str;

    /// Clone this event
    fn clone_event(&self) -> Box<dyn Event>;

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

pub use bus::{BoxFuture, EventBus};
pub use types::LifecycleEvent;

// Test module declaration
#[cfg(test)]
mod tests;
