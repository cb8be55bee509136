//! # Lifecycle events emitted by tasks, tasksets and subscriber workers.
//!
//! The [`EventKind`] enum classifies events across three groups:
//! - **Task events**: one execution of a [`Task`](crate::Task) (starting, completed, failed, panicked)
//! - **Taskset events**: one fan-out/fan-in run (starting, completed)
//! - **Subscriber events**: problems inside the subscriber fan-out (panic, overflow)
//!
//! The [`Event`] struct carries the metadata: timestamp, task name, slot index,
//! counts and a reason string.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Events from concurrently running tasks interleave; use `seq` to order them.
//!
//! ## Example
//! ```rust
//! use taskset::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskPanicked)
//!     .with_task("parse")
//!     .with_slot(2)
//!     .with_reason("index out of bounds");
//!
//! assert_eq!(ev.kind, EventKind::TaskPanicked);
//! assert_eq!(ev.task.as_deref(), Some("parse"));
//! assert_eq!(ev.slot, Some(2));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Task events ===
    /// Handler is about to run.
    ///
    /// Sets:
    /// - `task`: task name (if named)
    /// - `slot`: position in the taskset (if launched by one)
    TaskStarting,

    /// Handler returned a result without an error.
    ///
    /// Sets: `task`, `slot`
    TaskCompleted,

    /// Handler returned a result with an error it set itself.
    ///
    /// Sets: `task`, `slot`, `reason` (error text)
    TaskFailed,

    /// Handler panicked; the panic was converted into an error result.
    ///
    /// Sets: `task`, `slot`, `reason` (panic text)
    TaskPanicked,

    // === Taskset events ===
    /// A taskset run is fanning out.
    ///
    /// Sets: `tasks` (number of slots)
    TasksetStarting,

    /// Every slot of a taskset run produced its result.
    ///
    /// Sets: `tasks`, `failed` (slots whose result carries an error)
    TasksetCompleted,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `task` (subscriber name), `reason` (panic text)
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `task` (subscriber name), `reason`
    SubscriberOverflow,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Task (or subscriber) name, if known.
    pub task: Option<Arc<str>>,
    /// Slot index inside a taskset.
    pub slot: Option<u32>,
    /// Number of slots in a taskset run.
    pub tasks: Option<u32>,
    /// Number of slots that finished with an error.
    pub failed: Option<u32>,
    /// Human-readable reason (error or panic text, overflow details).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            slot: None,
            tasks: None,
            failed: None,
            reason: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches an optional task name; `None` leaves the field empty.
    #[inline]
    pub fn with_task_opt(mut self, task: Option<&Arc<str>>) -> Self {
        self.task = task.cloned();
        self
    }

    /// Attaches a taskset slot index (saturates at `u32::MAX`).
    #[inline]
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(saturate(slot));
        self
    }

    /// Attaches the number of slots in a taskset run.
    #[inline]
    pub fn with_tasks(mut self, n: usize) -> Self {
        self.tasks = Some(saturate(n));
        self
    }

    /// Attaches the number of failed slots.
    #[inline]
    pub fn with_failed(mut self, n: usize) -> Self {
        self.failed = Some(saturate(n));
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    /// `true` for events the subscriber layer reports about itself.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
        )
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
