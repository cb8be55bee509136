//! # Event subscribers.
//!
//! ```text
//!   task thread ── publish(Event) ──► Bus ──► executor listener ──► SubscriberSet
//!                                                                      │
//!                                                           ┌──────────┼──────────┐
//!                                                           ▼          ▼          ▼
//!                                                       LogWriter   Metrics    Custom
//! ```
//!
//! Implement [`Subscribe`] and pass it to
//! [`ExecutorBuilder::with_subscribers`](crate::ExecutorBuilder::with_subscribers).

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use set::SubscriberSet;
pub use subscribe::Subscribe;
