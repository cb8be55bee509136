use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use async_trait::async_trait;
use taskset::{Config, Event, EventKind, Executor, Subscribe, Task, TaskError, TaskResult};

fn sum(params: &[i64]) -> TaskResult<i64> {
    TaskResult::ok(params[0] + params[1])
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .expect("runtime")
}

#[tokio::test]
async fn wait_returns_handler_result_unchanged() {
    let exec = Executor::current().unwrap();
    let task = Task::new(sum, vec![2, 3]);

    assert_eq!(task.wait(&exec).await, TaskResult::ok(5));
}

#[tokio::test]
async fn handler_reported_error_passes_through() {
    let exec = Executor::current().unwrap();
    let task = Task::new(
        |p: &[i64]| {
            if p[0] < 0 {
                TaskResult::fail("negative input")
            } else {
                TaskResult::ok(p[0])
            }
        },
        vec![-1],
    );

    let res = task.wait(&exec).await;
    assert_eq!(res.data, None);
    assert_eq!(res.error, Some(TaskError::fail("negative input")));
}

#[tokio::test]
async fn out_of_bounds_panic_becomes_error_result() {
    let exec = Executor::current().unwrap();
    let task = Task::new(sum, vec![]);

    let res = task.wait(&exec).await;
    assert_eq!(res.data, None);
    let err = res.error.expect("panic converted to error");
    assert!(err.is_panic());
    assert!(err.to_string().contains("index out of bounds"), "{err}");
}

#[tokio::test]
async fn custom_panic_message_is_kept() {
    let exec = Executor::current().unwrap();
    let task: Task<u8, u8> = Task::new(|_: &[u8]| panic!("invariant violated: {}", 7), vec![]);

    let res = task.wait(&exec).await;
    assert_eq!(
        res.error,
        Some(TaskError::Panicked {
            message: "invariant violated: 7".into()
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn resolver_runs_once_even_when_handler_panics() {
    let exec = Executor::current().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = tokio::sync::oneshot::channel();

    let task: Task<u8, u8> = Task::new(|_: &[u8]| panic!("boom"), vec![]);
    let counter = Arc::clone(&calls);
    task.run(&exec, move |res| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(res);
    });

    let res = rx.await.expect("resolver called");
    assert!(res.error.as_ref().is_some_and(TaskError::is_panic));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn resolver_does_not_run_on_caller_thread() {
    let exec = Executor::current().unwrap();
    let caller = std::thread::current().id();
    let (tx, rx) = tokio::sync::oneshot::channel();

    Task::new(sum, vec![1, 1]).run(&exec, move |res| {
        let _ = tx.send((std::thread::current().id(), res));
    });

    let (resolver_thread, res) = rx.await.unwrap();
    assert_ne!(resolver_thread, caller);
    assert_eq!(res, TaskResult::ok(2));
}

#[tokio::test]
async fn repeated_wait_gives_independent_results() {
    let exec = Executor::current().unwrap();
    let task = Task::new(|p: &[String]| TaskResult::ok(p.join("-")), vec!["a".into(), "b".into()]);

    let first = task.wait(&exec).await;
    let second = task.wait(&exec).await;

    assert_eq!(first, TaskResult::ok("a-b".to_string()));
    assert_eq!(first, second);
    assert_eq!(task.params(), ["a", "b"]);
}

#[tokio::test]
async fn panic_does_not_poison_later_runs() {
    let exec = Executor::current().unwrap();
    let task = Task::new(
        |p: &[usize]| {
            assert!(p[0] % 2 == 0, "odd input");
            TaskResult::ok(p[0] / 2)
        },
        vec![3],
    );
    assert!(task.wait(&exec).await.is_err());

    let even = Task::new(|p: &[usize]| TaskResult::ok(p[0] / 2), vec![4]);
    assert_eq!(even.wait(&exec).await, TaskResult::ok(2));
}

#[test]
fn blocking_wait_from_plain_thread() {
    let rt = runtime();
    let exec = Executor::new(rt.handle().clone());

    assert_eq!(Task::new(sum, vec![2, 3]).blocking_wait(&exec), TaskResult::ok(5));

    let res = Task::new(sum, vec![1]).blocking_wait(&exec);
    assert!(res.data.is_none());
    assert!(res.error.is_some());
}

#[test]
fn run_returns_before_handler_finishes() {
    let rt = runtime();
    let exec = Executor::new(rt.handle().clone());
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let release_rx = std::sync::Mutex::new(release_rx);
    let (done_tx, done_rx) = mpsc::channel();

    let task = Task::new(
        move |_: &[()]| {
            release_rx.lock().unwrap().recv().unwrap();
            TaskResult::ok("released")
        },
        vec![],
    );
    task.run(&exec, move |res| done_tx.send(res).unwrap());

    assert!(done_rx.try_recv().is_err());
    release_tx.send(()).unwrap();
    assert_eq!(
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        TaskResult::ok("released")
    );
}

#[tokio::test]
async fn lifecycle_events_are_published() {
    let exec = Executor::current().unwrap();
    let mut events = exec.subscribe();

    let task: Task<u8, u8> = Task::new(|_: &[u8]| panic!("kaput"), vec![]).with_name("faulty");
    task.wait(&exec).await;

    let starting = events.recv().await.unwrap();
    assert_eq!(starting.kind, EventKind::TaskStarting);
    assert_eq!(starting.task.as_deref(), Some("faulty"));
    assert_eq!(starting.slot, None);

    let outcome = events.recv().await.unwrap();
    assert_eq!(outcome.kind, EventKind::TaskPanicked);
    assert_eq!(outcome.reason.as_deref(), Some("kaput"));
    assert!(outcome.seq > starting.seq);
}

#[test]
fn shut_down_runtime_resolves_with_dropped() {
    let rt = runtime();
    let handle = rt.handle().clone();
    rt.shutdown_background();
    let exec = Executor::new(handle);

    let (tx, rx) = mpsc::channel();
    Task::new(sum, vec![2, 3]).run(&exec, move |res| tx.send(res).unwrap());
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        TaskResult::err(TaskError::Dropped)
    );
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

    assert_eq!(
        Task::new(sum, vec![2, 3]).blocking_wait(&exec),
        TaskResult::err(TaskError::Dropped)
    );
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

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_subscriber_is_reported_once_per_event() {
    let exec = Executor::builder(Config::default())
        .with_subscribers(vec![Arc::new(Exploder) as Arc<dyn Subscribe>])
        .build()
        .unwrap();
    let mut events = exec.subscribe();

    assert_eq!(Task::new(sum, vec![1, 2]).wait(&exec).await, TaskResult::ok(3));
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut kinds = Vec::new();
    while let Ok(ev) = events.try_recv() {
        kinds.push(ev.kind);
    }
    let panicked = kinds
        .iter()
        .filter(|k| **k == EventKind::SubscriberPanicked)
        .count();

    // TaskStarting and TaskCompleted each blow up once; the reports do not.
    assert_eq!(panicked, 2, "{kinds:?}");
    assert_eq!(kinds.len(), 4, "{kinds:?}");
}

#[test]
fn executor_current_requires_runtime() {
    assert!(Executor::current().is_err());

    let rt = runtime();
    let built = Executor::builder(Config::default())
        .with_handle(rt.handle().clone())
        .build();
    assert!(built.is_ok());
}
