//! # Non-blocking event fan-out to multiple subscribers.
//!
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - `emit()` returns immediately (`try_send`).
//! - Per-subscriber FIFO; no ordering across subscribers.
//! - Full or closed queue: event dropped for that subscriber, `SubscriberOverflow` published.
//! - A panicking subscriber is reported as `SubscriberPanicked`; its worker keeps going.
//! - Reports never feed back: a `SubscriberPanicked`/`SubscriberOverflow` event is
//!   not delivered to the subscriber it names, and a panic while handling one is
//!   swallowed instead of republished.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for event subscribers.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates the set and spawns one worker per subscriber on `handle`.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus, handle: &Handle) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));
            let worker_bus = bus.clone();

            let worker = handle.spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(payload) = AssertUnwindSafe(fut).catch_unwind().await {
                        if ev.is_subscriber_event() {
                            continue;
                        }
                        let info = TaskError::from_panic(payload).to_string();
                        worker_bus.publish(Event::subscriber_panicked(sub.name(), info));
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(worker);
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits one event to every subscriber queue.
    ///
    /// Overflow events are not re-reported when they overflow themselves, and
    /// subscriber reports skip the subscriber they are about.
    pub fn emit(&self, event: Event) {
        let is_overflow_evt = matches!(event.kind, EventKind::SubscriberOverflow);
        let origin = event
            .is_subscriber_event()
            .then(|| event.task.clone())
            .flatten();
        let event = Arc::new(event);

        for channel in &self.channels {
            if origin.as_deref() == Some(channel.name) {
                continue;
            }
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow_evt {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Closes all queues and waits for the workers to drain them.
    pub async fn shutdown(self) {
        drop(self.channels);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<EventKind>>);

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            self.0.lock().unwrap().push(ev.kind);
        }
        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Exploder;

    #[async_trait]
    impl Subscribe for Exploder {
        async fn on_event(&self, _ev: &Event) {
            panic!("subscriber blew up");
        }
        fn name(&self) -> &'static str {
            "exploder"
        }
    }

    #[tokio::test]
    async fn test_emit_reaches_every_subscriber_in_order() {
        let bus = Bus::new(16);
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let set = SubscriberSet::new(
            vec![recorder.clone() as Arc<dyn Subscribe>],
            bus,
            &Handle::current(),
        );

        set.emit(Event::new(EventKind::TasksetStarting));
        set.emit(Event::new(EventKind::TasksetCompleted));
        set.shutdown().await;

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![EventKind::TasksetStarting, EventKind::TasksetCompleted]
        );
    }

    #[tokio::test]
    async fn test_subscriber_panic_is_published() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(
            vec![Arc::new(Exploder) as Arc<dyn Subscribe>],
            bus,
            &Handle::current(),
        );

        set.emit(Event::new(EventKind::TaskStarting));
        set.shutdown().await;

        let ev = rx.recv().await.expect("panic event");
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.task.as_deref(), Some("exploder"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber blew up"));
    }

    #[tokio::test]
    async fn test_reports_skip_their_origin() {
        let bus = Bus::new(16);
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let set = SubscriberSet::new(
            vec![recorder.clone() as Arc<dyn Subscribe>],
            bus,
            &Handle::current(),
        );

        set.emit(Event::subscriber_panicked("recorder", "own report".into()));
        set.emit(Event::subscriber_panicked("exploder", "other report".into()));
        set.shutdown().await;

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![EventKind::SubscriberPanicked]
        );
    }

    #[tokio::test]
    async fn test_panic_on_report_is_not_republished() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(
            vec![Arc::new(Exploder) as Arc<dyn Subscribe>],
            bus,
            &Handle::current(),
        );

        set.emit(Event::subscriber_overflow("recorder", "full"));
        set.emit(Event::subscriber_panicked("recorder", "boom".into()));
        set.shutdown().await;

        assert!(rx.try_recv().is_err());
    }
}
