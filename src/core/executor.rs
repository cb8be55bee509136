//! # Executor: the explicit execution context for tasks.
//!
//! Every entry point of [`Task`](crate::Task) and [`Taskset`](crate::Taskset)
//! takes an `&Executor`. It bundles:
//! - a tokio runtime [`Handle`]: handlers and taskset collectors run on its
//!   blocking pool, so a runtime nobody drives can still execute them;
//! - the event [`Bus`] that task threads publish lifecycle events into;
//! - optionally, a listener forwarding bus events to a [`SubscriberSet`].
//!
//! ```text
//! Executor (Arc<Inner>)
//!   ├─ Handle ──► spawn_blocking(handler | collector)
//!   ├─ Bus    ──► Executor::subscribe()
//!   └─ stop   ──► listener: Bus ─► SubscriberSet ─► workers
//! ```
//!
//! Cloning is cheap. The listener exits once the last clone is dropped; every
//! in-flight task holds a clone, so events of running tasks are still delivered.
//!
//! ## Example
//! ```rust
//! use taskset::{Executor, Task, TaskResult};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exec = Executor::current()?;
//!     let double = Task::new(|p: &[i32]| TaskResult::ok(p[0] * 2), vec![21]);
//!     assert_eq!(double.wait(&exec).await, TaskResult::ok(42));
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, oneshot};

use super::{builder::ExecutorBuilder, Config};
use crate::error::RuntimeError;
use crate::events::{Bus, Event};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Execution context shared by tasks and tasksets.
#[derive(Clone, Debug)]
pub struct Executor {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    handle: Handle,
    bus: Bus,
    /// Dropping this (with the last `Executor`) stops the subscriber listener.
    _listener_stop: Option<oneshot::Sender<()>>,
}

impl Executor {
    /// Executor on `handle` with default configuration and no subscribers.
    pub fn new(handle: Handle) -> Self {
        Self::new_internal(handle, Config::default().bus_capacity_clamped(), Vec::new())
    }

    /// Executor on the runtime the caller is currently running in.
    ///
    /// # Errors
    /// [`RuntimeError::NoRuntime`] outside a tokio runtime.
    pub fn current() -> Result<Self, RuntimeError> {
        ExecutorBuilder::new(Config::default()).build()
    }

    /// Starts a builder with the given configuration.
    pub fn builder(cfg: Config) -> ExecutorBuilder {
        ExecutorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        handle: Handle,
        bus_capacity: usize,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        let bus = Bus::new(bus_capacity);

        let listener_stop = if subscribers.is_empty() {
            None
        } else {
            let set = SubscriberSet::new(subscribers, bus.clone(), &handle);
            let (stop_tx, stop_rx) = oneshot::channel();
            handle.spawn(subscriber_listener(bus.subscribe(), set, stop_rx));
            Some(stop_tx)
        };

        Self {
            inner: Arc::new(Inner {
                handle,
                bus,
                _listener_stop: listener_stop,
            }),
        }
    }

    /// Runtime handle tasks are launched on.
    pub fn handle(&self) -> &Handle {
        &self.inner.handle
    }

    /// Receiver for lifecycle events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }

    pub(crate) fn publish(&self, ev: Event) {
        self.inner.bus.publish(ev);
    }
}

/// Forwards bus events to subscribers until the executor is gone, then drains.
async fn subscriber_listener(
    mut rx: broadcast::Receiver<Event>,
    set: SubscriberSet,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            msg = rx.recv() => match msg {
                Ok(ev) => set.emit(ev),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = &mut stop => break,
        }
    }

    loop {
        match rx.try_recv() {
            Ok(ev) => set.emit(ev),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    set.shutdown().await;
}
