//! # Tasks, tasksets and their results.
//!
//! - [`TaskResult`] - outcome of one execution (data and/or error)
//! - [`Task`] - handler bound to parameters; `run` / `wait` / `blocking_wait`
//! - [`Taskset`] - ordered fan-out/fan-in; `run` / `wait_all` / `blocking_wait_all`
//! - [`Handler`], [`TaskResolver`], [`TasksetResolver`] - the callback shapes

mod result;
mod task;
mod taskset;

pub use result::TaskResult;
pub use task::{Handler, Task, TaskResolver};
pub use taskset::{Taskset, TasksetResolver};
