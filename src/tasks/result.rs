//! # Task result value.
//!
//! [`TaskResult`] is what every execution produces, whether the handler returned
//! normally, reported its own error, or panicked.
//!
//! Both fields are public and **not** mutually exclusive at the type level:
//! - success: `data = Some(..)`, `error = None`
//! - failure: `data = None`, `error = Some(..)`
//!
//! A result is built whole and then moved to its single consumer; nobody observes
//! a half-written result.

use crate::error::TaskError;

/// Outcome of one task execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult<T> {
    /// Payload produced by the handler.
    pub data: Option<T>,
    /// Error reported by the handler or produced at the task boundary.
    pub error: Option<TaskError>,
}

impl<T> TaskResult<T> {
    /// Successful result carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Failed result carrying `error` and no data.
    pub fn err(error: TaskError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Handler-reported failure with a message ([`TaskError::Fail`]).
    pub fn fail(message: impl Into<String>) -> Self {
        Self::err(TaskError::fail(message))
    }

    /// `true` when no error is set.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// `true` when an error is set (data may still be present).
    #[inline]
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Converts into a `Result`, letting the error win when both fields are set.
    pub fn into_result(self) -> Result<Option<T>, TaskError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.data),
        }
    }
}

impl<T> Default for TaskResult<T> {
    /// Both fields empty.
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

impl<T> From<Result<T, TaskError>> for TaskResult<T> {
    fn from(res: Result<T, TaskError>) -> Self {
        match res {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e),
        }
    }
}
