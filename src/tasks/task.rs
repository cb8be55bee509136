//! # Task: a handler bound to its parameters.
//!
//! A [`Task`] is built once with [`Task::new`] and never invokes anything until
//! one of its execution entry points is called:
//!
//! | Entry point                   | Caller is…            | Result delivered to        |
//! |-------------------------------|-----------------------|----------------------------|
//! | [`Task::run`]                 | never blocked         | resolver, on the task thread |
//! | [`Task::wait`]                | suspended (async)     | return value               |
//! | [`Task::blocking_wait`]       | blocked (OS thread)   | return value               |
//!
//! ## Execution
//! ```text
//! launch()
//!   └─► Handle::spawn_blocking ──► publish TaskStarting
//!                                  catch_unwind(handler(params))
//!                                    ├─ returned ─► result as-is
//!                                    └─ panicked ─► TaskResult::err(Panicked{message})
//!                                  publish TaskCompleted | TaskFailed | TaskPanicked
//!                                  resolver(result)      (exactly once)
//! ```
//!
//! Handler-reported errors are never inspected or rewritten. A panic is never
//! propagated past the task thread.
//!
//! Converting a panic does not silence it: the process-wide panic hook still
//! runs first and, with the default hook, prints `thread '…' panicked at …` to
//! stderr. Install a quieter hook with [`std::panic::set_hook`] if converted
//! faults should leave no trace on stderr.
//!
//! If the runtime drops the execution before the handler runs (shutdown), the
//! resolver still runs exactly once, with [`TaskError::Dropped`].
//!
//! ## Example
//! ```rust
//! use taskset::{Executor, Task, TaskResult};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exec = Executor::current()?;
//!
//!     let sum = Task::new(|p: &[i64]| TaskResult::ok(p[0] + p[1]), vec![2, 3]);
//!     assert_eq!(sum.wait(&exec).await, TaskResult::ok(5));
//!
//!     let oob = Task::new(|p: &[i64]| TaskResult::ok(p[0]), vec![]);
//!     let res = oob.wait(&exec).await;
//!     assert!(res.data.is_none());
//!     assert!(res.error.is_some());
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::core::Executor;
use crate::error::TaskError;
use crate::events::{Event, EventKind};
use crate::tasks::TaskResult;

/// Business logic of a task: reads the bound parameters, produces a result.
pub type Handler<P, T> = Arc<dyn Fn(&[P]) -> TaskResult<T> + Send + Sync + 'static>;

/// Callback receiving the result of one task execution.
pub type TaskResolver<T> = Box<dyn FnOnce(TaskResult<T>) + Send + 'static>;

/// A deferred unit of work.
///
/// Cloning shares the handler and the parameters; clones describe the same work.
pub struct Task<P, T> {
    name: Option<Arc<str>>,
    handler: Handler<P, T>,
    params: Arc<[P]>,
}

impl<P, T> Task<P, T>
where
    P: Send + Sync + 'static,
    T: Send + 'static,
{
    /// Binds `handler` to `params` without invoking it.
    pub fn new<F>(handler: F, params: Vec<P>) -> Self
    where
        F: Fn(&[P]) -> TaskResult<T> + Send + Sync + 'static,
    {
        Self::from_handler(Arc::new(handler), params)
    }

    /// Binds an already shared handler to `params`.
    pub fn from_handler(handler: Handler<P, T>, params: Vec<P>) -> Self {
        Self {
            name: None,
            handler,
            params: Arc::from(params),
        }
    }

    /// Attaches a name used in lifecycle events.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Task name, if one was attached.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parameters the handler will receive.
    pub fn params(&self) -> &[P] {
        &self.params
    }

    /// Runs the handler concurrently and returns immediately.
    ///
    /// `resolver` is called exactly once with the handler's result, or with a
    /// [`TaskError::Panicked`] result if the handler panicked. It runs on the
    /// task's thread, not on the caller's. When the runtime is shutting down and
    /// discards the execution, `resolver` gets [`TaskError::Dropped`] instead,
    /// on whichever thread dropped it.
    pub fn run<R>(&self, exec: &Executor, resolver: R)
    where
        R: FnOnce(TaskResult<T>) + Send + 'static,
    {
        self.launch(exec, None, Box::new(resolver));
    }

    /// Runs the handler and suspends the calling async task until it finishes.
    ///
    /// Other tasks on the runtime keep running meanwhile.
    pub async fn wait(&self, exec: &Executor) -> TaskResult<T> {
        self.wait_in_slot(exec, None).await
    }

    /// Runs the handler and blocks the calling thread until it finishes.
    ///
    /// # Panics
    /// When called from within an asynchronous execution context; use
    /// [`Task::wait`] there.
    pub fn blocking_wait(&self, exec: &Executor) -> TaskResult<T> {
        received_or_dropped(self.launch_oneshot(exec, None).blocking_recv())
    }

    /// Launches now; the returned future only waits for the result.
    pub(crate) fn wait_in_slot(
        &self,
        exec: &Executor,
        slot: Option<usize>,
    ) -> impl Future<Output = TaskResult<T>> + Send + 'static {
        let rx = self.launch_oneshot(exec, slot);
        async move { received_or_dropped(rx.await) }
    }

    fn launch_oneshot(
        &self,
        exec: &Executor,
        slot: Option<usize>,
    ) -> oneshot::Receiver<TaskResult<T>> {
        let (tx, rx) = oneshot::channel();
        self.launch(
            exec,
            slot,
            Box::new(move |res| {
                let _ = tx.send(res);
            }),
        );
        rx
    }

    fn launch(&self, exec: &Executor, slot: Option<usize>, resolver: TaskResolver<T>) {
        let handler = Arc::clone(&self.handler);
        let params = Arc::clone(&self.params);
        let name = self.name.clone();
        let ctx = exec.clone();
        let guard = ResolveOnce::new(resolver, TaskResult::err(TaskError::Dropped));

        exec.handle().spawn_blocking(move || {
            ctx.publish(task_event(EventKind::TaskStarting, name.as_ref(), slot));

            let result = panic::catch_unwind(AssertUnwindSafe(|| handler(&params[..])))
                .unwrap_or_else(|payload| TaskResult::err(TaskError::from_panic(payload)));

            ctx.publish(outcome_event(&result, name.as_ref(), slot));
            guard.resolve(result);
        });
    }
}

/// Holds a resolver until it is called; dropping it unresolved hands it `fallback`.
pub(crate) struct ResolveOnce<V> {
    pending: Option<(Box<dyn FnOnce(V) + Send + 'static>, V)>,
}

impl<V> ResolveOnce<V> {
    pub(crate) fn new(resolver: Box<dyn FnOnce(V) + Send + 'static>, fallback: V) -> Self {
        Self {
            pending: Some((resolver, fallback)),
        }
    }

    pub(crate) fn resolve(mut self, value: V) {
        if let Some((resolver, _)) = self.pending.take() {
            resolver(value);
        }
    }
}

impl<V> Drop for ResolveOnce<V> {
    fn drop(&mut self) {
        if let Some((resolver, fallback)) = self.pending.take() {
            resolver(fallback);
        }
    }
}

impl<P, T> Clone for Task<P, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handler: Arc::clone(&self.handler),
            params: Arc::clone(&self.params),
        }
    }
}

impl<P, T> fmt::Debug for Task<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .finish_non_exhaustive()
    }
}

/// A dropped sender means the runtime discarded the execution.
fn received_or_dropped<T>(
    received: Result<TaskResult<T>, oneshot::error::RecvError>,
) -> TaskResult<T> {
    received.unwrap_or_else(|_| TaskResult::err(TaskError::Dropped))
}

fn task_event(kind: EventKind, name: Option<&Arc<str>>, slot: Option<usize>) -> Event {
    let ev = Event::new(kind).with_task_opt(name);
    match slot {
        Some(slot) => ev.with_slot(slot),
        None => ev,
    }
}

fn outcome_event<T>(
    result: &TaskResult<T>,
    name: Option<&Arc<str>>,
    slot: Option<usize>,
) -> Event {
    match &result.error {
        None => task_event(EventKind::TaskCompleted, name, slot),
        Some(e) if e.is_panic() => {
            task_event(EventKind::TaskPanicked, name, slot).with_reason(e.to_string())
        }
        Some(e) => task_event(EventKind::TaskFailed, name, slot).with_reason(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_invoke_handler() {
        let task: Task<u8, u8> = Task::new(|_: &[u8]| panic!("must not run"), vec![1, 2]);
        assert_eq!(task.params(), &[1u8, 2]);
        assert_eq!(task.name(), None);
    }

    #[test]
    fn test_clone_shares_params() {
        let task = Task::new(|p: &[u8]| TaskResult::ok(p.len()), vec![1, 2, 3]).with_name("len");
        let copy = task.clone();
        assert_eq!(copy.name(), Some("len"));
        assert!(std::ptr::eq(task.params(), copy.params()));
    }

    #[test]
    fn test_unresolved_guard_reports_dropped() {
        let (tx, rx) = std::sync::mpsc::channel();
        let guard: ResolveOnce<TaskResult<u8>> = ResolveOnce::new(
            Box::new(move |res| tx.send(res).unwrap()),
            TaskResult::err(TaskError::Dropped),
        );
        drop(guard);
        assert_eq!(rx.recv().unwrap(), TaskResult::err(TaskError::Dropped));
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_resolved_guard_calls_once() {
        let (tx, rx) = std::sync::mpsc::channel();
        let guard = ResolveOnce::new(
            Box::new(move |res| tx.send(res).unwrap()),
            TaskResult::err(TaskError::Dropped),
        );
        guard.resolve(TaskResult::ok(3));
        assert_eq!(rx.recv().unwrap(), TaskResult::ok(3));
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_outcome_event_kinds() {
        let ok = outcome_event(&TaskResult::ok(1), None, Some(0));
        assert_eq!(ok.kind, EventKind::TaskCompleted);
        assert_eq!(ok.slot, Some(0));

        let failed: TaskResult<u8> = TaskResult::fail("bad");
        assert_eq!(outcome_event(&failed, None, None).kind, EventKind::TaskFailed);

        let panicked: TaskResult<u8> = TaskResult::err(TaskError::Panicked {
            message: "boom".into(),
        });
        let ev = outcome_event(&panicked, None, None);
        assert_eq!(ev.kind, EventKind::TaskPanicked);
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }
}
