//! Lifecycle events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: task threads (`Task::run`), taskset collectors, `SubscriberSet` workers.
//! - **Consumers**: the executor listener (fans out to `SubscriberSet`) and any
//!   receiver obtained from `Executor::subscribe()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
