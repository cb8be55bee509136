//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//!
//! ## Example output
//! ```text
//! [taskset-starting] tasks=3
//! [starting] task="fetch" slot=0
//! [panicked] task="parse" slot=1 err="index out of bounds: the len is 0 but the index is 0"
//! [completed] task="fetch" slot=0
//! [taskset-completed] tasks=3 failed=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::TaskStarting => {
                println!("[starting] task={task:?} slot={:?}", e.slot);
            }
            EventKind::TaskCompleted => {
                println!("[completed] task={task:?} slot={:?}", e.slot);
            }
            EventKind::TaskFailed => {
                println!(
                    "[failed] task={task:?} slot={:?} err={:?}",
                    e.slot, e.reason
                );
            }
            EventKind::TaskPanicked => {
                println!(
                    "[panicked] task={task:?} slot={:?} err={:?}",
                    e.slot, e.reason
                );
            }
            EventKind::TasksetStarting => {
                println!("[taskset-starting] tasks={:?}", e.tasks);
            }
            EventKind::TasksetCompleted => {
                println!(
                    "[taskset-completed] tasks={:?} failed={:?}",
                    e.tasks, e.failed
                );
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] subscriber={task} reason={:?}", e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={task} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
