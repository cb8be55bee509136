//! # Example: fan_out
//!
//! Runs a handful of tasks as one taskset and prints the ordered results.
//!
//! Demonstrates how to:
//! - Bind handlers to parameters with [`Task::new`].
//! - Mix successful, failing, panicking and empty slots in one [`Taskset`].
//! - Collect results with [`Taskset::wait_all`] and with a resolver via [`Taskset::run`].
//!
//! ## Flow
//! ```text
//! Taskset::wait_all()
//!     ├─► publish(TasksetStarting)
//!     ├─► slot 0: sum(2, 3)        ─► Ok(5)
//!     ├─► slot 1: sum()            ─► panic ─► Err(index out of bounds ...)
//!     ├─► slot 2: checked_div(1, 0) ─► Err(division by zero)
//!     ├─► slot 3: empty            ─► Err(task is null)
//!     └─► publish(TasksetCompleted)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example fan_out
//! cargo run --example fan_out --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use taskset::{Config, Executor, Task, TaskResult, Taskset};

fn sum(params: &[i64]) -> TaskResult<i64> {
    TaskResult::ok(params[0] + params[1])
}

fn checked_div(params: &[i64]) -> TaskResult<i64> {
    match params[0].checked_div(params[1]) {
        Some(q) => TaskResult::ok(q),
        None => TaskResult::fail("division by zero"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Subscribers (optional)
    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn taskset::Subscribe>> = vec![Arc::new(taskset::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn taskset::Subscribe>> = Vec::new();

    // 2. Executor on the current runtime
    let exec = Executor::builder(Config::default())
        .with_subscribers(subs)
        .build()?;

    // 3. Build the set
    let mut set = Taskset::new();
    set.add(Task::new(sum, vec![2, 3]).with_name("sum"));
    set.add(Task::new(sum, vec![]).with_name("sum-empty"));
    set.add(Task::new(checked_div, vec![1, 0]).with_name("div"));
    set.add_slot(None);

    // 4. Wait for everything
    for (slot, res) in set.wait_all(&exec).await.into_iter().enumerate() {
        match res.into_result() {
            Ok(data) => println!("slot {slot}: ok {data:?}"),
            Err(e) => println!("slot {slot}: {} ({})", e, e.as_label()),
        }
    }

    // 5. Same set, callback style
    let (tx, rx) = tokio::sync::oneshot::channel();
    set.run(&exec, move |results| {
        let _ = tx.send(results.iter().filter(|r| r.is_ok()).count());
    });
    println!("succeeded via resolver: {}", rx.await?);

    // Give subscriber workers a moment to flush.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
