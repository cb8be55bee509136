//! Error types used by the executor and by task results.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`] — errors raised while wiring up an [`Executor`](crate::Executor).
//! - [`TaskError`] — the error half of a [`TaskResult`](crate::TaskResult).
//!
//! Both types provide a stable `as_label` for logs/events; `Display` carries the details.
//! No task failure ever escapes as a panic: everything a caller observes is a
//! [`TaskError`] stored inside a result.

use std::any::Any;

use thiserror::Error;

/// # Errors produced while building an executor.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// No tokio runtime handle was supplied and none is active on this thread.
    #[error("no tokio runtime available: {reason}")]
    NoRuntime {
        /// Why the current runtime could not be obtained.
        reason: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use taskset::RuntimeError;
    ///
    /// let err = RuntimeError::NoRuntime { reason: "not inside a runtime".into() };
    /// assert_eq!(err.as_label(), "runtime_missing");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::NoRuntime { .. } => "runtime_missing",
        }
    }
}

/// # Errors carried by a task result.
///
/// - [`TaskError::Fail`] is reported deliberately by a handler and passed through untouched.
/// - [`TaskError::Panicked`] is produced at the task boundary when a handler panics.
/// - [`TaskError::NullTask`] fills an empty slot of a [`Taskset`](crate::Taskset).
/// - [`TaskError::Dropped`] means the runtime discarded the execution before it finished.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Handler returned an error of its own.
    #[error("{error}")]
    Fail {
        /// The handler's message.
        error: String,
    },

    /// Handler panicked; the panic was caught and converted.
    #[error("{message}")]
    Panicked {
        /// Text extracted from the panic payload.
        message: String,
    },

    /// The taskset slot held no task.
    #[error("task is null")]
    NullTask,

    /// The execution was dropped (runtime shut down) before producing a result.
    #[error("task execution dropped before completion")]
    Dropped,
}

impl TaskError {
    /// Builds a [`TaskError::Fail`] from any displayable message.
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Converts a caught panic payload into [`TaskError::Panicked`].
    ///
    /// `&str` and `String` payloads (what `panic!` produces) keep their text;
    /// anything else becomes `"unknown panic"`.
    ///
    /// # Example
    /// ```
    /// use taskset::TaskError;
    ///
    /// let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
    /// assert_eq!(TaskError::from_panic(payload).to_string(), "boom");
    /// ```
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        TaskError::Panicked { message }
    }

    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use taskset::TaskError;
    ///
    /// assert_eq!(TaskError::NullTask.as_label(), "task_null");
    /// assert_eq!(TaskError::fail("bad input").as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::NullTask => "task_null",
            TaskError::Dropped => "task_dropped",
        }
    }

    /// Indicates whether the error came from a caught panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panicked { .. })
    }
}
