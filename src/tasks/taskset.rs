//! # Taskset: ordered fan-out/fan-in over many tasks.
//!
//! A [`Taskset`] holds an ordered list of slots, each either a [`Task`] or empty.
//! Running it launches every task at once and collects one [`TaskResult`] per
//! slot, in slot order, no matter which task finishes first.
//!
//! ```text
//! fan_out()
//!   ├─ publish TasksetStarting{tasks}
//!   ├─ slot 0: Task ──► wait_in_slot ──► oneshot rx 0 ─┐
//!   ├─ slot 1: empty ─► ready(NullTask) ───────────────┤ join_all  ─► Vec[0..n]
//!   └─ slot n: Task ──► wait_in_slot ──► oneshot rx n ─┘ (positional)
//!                                                      └─► publish TasksetCompleted{tasks, failed}
//! ```
//!
//! ## Rules
//! - Entry *i* of the result always belongs to slot *i*.
//! - A failing or panicking task never affects its siblings.
//! - An empty slot resolves to `TaskError::NullTask` and nothing is launched for it.
//! - The aggregate result is produced only after every slot has finished.
//! - `add`/`add_slot` take `&mut self`; a run snapshots the slots at launch time.

use std::future::Future;

use futures::future::{self, join_all, Either};

use crate::core::Executor;
use crate::error::TaskError;
use crate::events::{Event, EventKind};
use crate::tasks::task::ResolveOnce;
use crate::tasks::{Task, TaskResult};

/// Callback receiving the ordered results of one taskset run.
pub type TasksetResolver<T> = Box<dyn FnOnce(Vec<TaskResult<T>>) + Send + 'static>;

/// Ordered collection of tasks executed concurrently as one unit.
pub struct Taskset<P, T> {
    tasks: Vec<Option<Task<P, T>>>,
}

impl<P, T> Taskset<P, T>
where
    P: Send + Sync + 'static,
    T: Send + 'static,
{
    /// Creates an empty taskset.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Appends a task.
    pub fn add(&mut self, task: Task<P, T>) {
        self.tasks.push(Some(task));
    }

    /// Appends a slot that may be empty; an empty slot yields a `NullTask` error.
    pub fn add_slot(&mut self, task: Option<Task<P, T>>) {
        self.tasks.push(task);
    }

    /// Number of slots (including empty ones).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// `true` if no slot was added.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Launches every task and returns immediately.
    ///
    /// `resolver` is called exactly once, from a blocking-pool thread, with the
    /// results in slot order after every task has finished. Collection does not
    /// need the runtime's scheduler to be driven, only its blocking pool. If the
    /// runtime is shutting down and discards the collection, `resolver` gets
    /// [`TaskError::Dropped`] for every slot.
    pub fn run<R>(&self, exec: &Executor, resolver: R)
    where
        R: FnOnce(Vec<TaskResult<T>>) + Send + 'static,
    {
        self.run_boxed(exec, Box::new(resolver));
    }

    /// Launches every task and suspends the calling async task until all finish.
    pub async fn wait_all(&self, exec: &Executor) -> Vec<TaskResult<T>> {
        self.fan_out(exec).await
    }

    /// Launches every task and blocks the calling thread until all finish.
    ///
    /// Results are collected on the calling thread, so this also works against
    /// a runtime nobody is driving (e.g. a `current_thread` runtime held idle).
    ///
    /// Do not call it from async code: it parks the worker thread. Use
    /// [`Taskset::wait_all`] there.
    pub fn blocking_wait_all(&self, exec: &Executor) -> Vec<TaskResult<T>> {
        futures::executor::block_on(self.fan_out(exec))
    }

    fn run_boxed(&self, exec: &Executor, resolver: TasksetResolver<T>) {
        let dropped = (0..self.tasks.len())
            .map(|_| TaskResult::err(TaskError::Dropped))
            .collect();
        let guard = ResolveOnce::new(resolver, dropped);
        let pending = self.fan_out(exec);
        exec.handle().spawn_blocking(move || {
            guard.resolve(futures::executor::block_on(pending));
        });
    }

    /// Launches all slots now; the returned future only collects the results.
    fn fan_out(
        &self,
        exec: &Executor,
    ) -> impl Future<Output = Vec<TaskResult<T>>> + Send + 'static {
        let total = self.tasks.len();
        exec.publish(Event::new(EventKind::TasksetStarting).with_tasks(total));

        let slots: Vec<_> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(slot, task)| match task {
                Some(task) => Either::Left(task.wait_in_slot(exec, Some(slot))),
                None => Either::Right(future::ready(TaskResult::err(TaskError::NullTask))),
            })
            .collect();

        let ctx = exec.clone();
        async move {
            let results = join_all(slots).await;
            let failed = results.iter().filter(|r| r.is_err()).count();
            ctx.publish(
                Event::new(EventKind::TasksetCompleted)
                    .with_tasks(total)
                    .with_failed(failed),
            );
            results
        }
    }
}

impl<P, T> Default for Taskset<P, T>
where
    P: Send + Sync + 'static,
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> FromIterator<Task<P, T>> for Taskset<P, T> {
    fn from_iter<I: IntoIterator<Item = Task<P, T>>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().map(Some).collect(),
        }
    }
}
