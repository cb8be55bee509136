//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for observing task and taskset lifecycle
//! events. Each subscriber is driven by its own worker fed by a bounded queue
//! owned by the executor's subscriber set.
//!
//! ## Contract
//! - Slow subscribers never block task threads nor other subscribers.
//! - On queue overflow, events for that subscriber are dropped and a
//!   `SubscriberOverflow` event is published.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use async_trait::async_trait;
//! use taskset::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct PanicCounter(AtomicUsize);
//!
//! #[async_trait]
//! impl Subscribe for PanicCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::TaskPanicked {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "panic-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated async worker; avoid blocking calls.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for overflow/panic events).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue (minimum 1).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
