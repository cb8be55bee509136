//! # taskset
//!
//! **taskset** is a small concurrent task-execution primitive on top of tokio.
//!
//! A [`Task`] binds a handler to its parameters. Running it executes the handler
//! on its own thread; the result comes back through a callback ([`Task::run`]) or
//! by waiting ([`Task::wait`], [`Task::blocking_wait`]). A panic inside the handler
//! is caught at the task boundary and turned into an error result.
//!
//! A [`Taskset`] runs many tasks at once and hands back one ordered list of
//! results ([`Taskset::run`], [`Taskset::wait_all`], [`Taskset::blocking_wait_all`]).
//!
//! ## Architecture
//! ```text
//!   Task #0        Task #1        Task #2         (handler + params)
//!      │              │              │
//!      ▼              ▼              ▼
//! ┌─────────────────────────────────────────────┐
//! │ Executor (explicit runtime context)         │
//! │  - tokio Handle: spawn_blocking per task    │
//! │  - Bus: lifecycle events                    │
//! │  - SubscriberSet (optional)                 │
//! └──────┬──────────────┬──────────────┬────────┘
//!        ▼              ▼              ▼
//!   catch_unwind   catch_unwind   catch_unwind     (one thread per launch)
//!        │              │              │
//!        ▼              ▼              ▼
//!   oneshot #0     oneshot #1     oneshot #2       (one slot per task)
//!        └──────────────┼──────────────┘
//!                       ▼
//!                   join_all ──► Vec<TaskResult> in slot order
//! ```
//!
//! ## Features
//! | Area              | Description                                          | Key types / traits                       |
//! |-------------------|------------------------------------------------------|------------------------------------------|
//! | **Tasks**         | Single unit of work with panic isolation.            | [`Task`], [`Handler`], [`TaskResolver`]  |
//! | **Tasksets**      | Ordered fan-out/fan-in.                              | [`Taskset`], [`TasksetResolver`]         |
//! | **Results**       | Data and/or error of one execution.                  | [`TaskResult`]                           |
//! | **Errors**        | Typed errors for tasks and executor wiring.          | [`TaskError`], [`RuntimeError`]          |
//! | **Execution**     | Explicit runtime context and configuration.          | [`Executor`], [`ExecutorBuilder`], [`Config`] |
//! | **Subscriber API**| Observe task lifecycle events.                       | [`Subscribe`], [`Event`], [`EventKind`]  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use taskset::{Executor, Task, TaskResult, Taskset};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exec = Executor::current()?;
//!
//!     let mut set = Taskset::new();
//!     for n in 1..=3 {
//!         set.add(Task::new(move |_: &[()]| TaskResult::ok(n), vec![]));
//!     }
//!
//!     let results = set.wait_all(&exec).await;
//!     assert_eq!(
//!         results,
//!         vec![TaskResult::ok(1), TaskResult::ok(2), TaskResult::ok(3)]
//!     );
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{Config, Executor, ExecutorBuilder};
pub use error::{RuntimeError, TaskError};
pub use events::{Event, EventKind};
pub use subscribers::Subscribe;
pub use tasks::{Handler, Task, TaskResolver, TaskResult, Taskset, TasksetResolver};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
