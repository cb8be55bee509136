use std::sync::Arc;

use tokio::runtime::Handle;

use super::{executor::Executor, Config};
use crate::{error::RuntimeError, subscribers::Subscribe};

/// Builder for an [`Executor`] with optional subscribers and an explicit runtime handle.
pub struct ExecutorBuilder {
    cfg: Config,
    handle: Option<Handle>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ExecutorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            handle: None,
            subscribers: Vec::new(),
        }
    }

    /// Runs tasks on this runtime instead of the one active at `build()` time.
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive lifecycle events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the executor.
    ///
    /// # Errors
    /// [`RuntimeError::NoRuntime`] when no handle was given and the calling
    /// thread is not inside a tokio runtime.
    pub fn build(self) -> Result<Executor, RuntimeError> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|e| RuntimeError::NoRuntime {
                reason: e.to_string(),
            })?,
        };
        Ok(Executor::new_internal(
            handle,
            self.cfg.bus_capacity_clamped(),
            self.subscribers,
        ))
    }
}
