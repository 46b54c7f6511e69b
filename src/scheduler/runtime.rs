//! Tokio-backed scheduler
//!
//! Schedules each task as a spawned future that sleeps for the requested
//! delay. Cancellation aborts the spawned task, so a cancelled transition
//! neither mutates state nor invokes its callback.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{ScheduleHandle, Scheduler, SchedulerError, Task};

/// Scheduler that runs tasks on a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Bind to the runtime the caller is currently on.
    ///
    /// Fails outside a runtime context.
    pub fn current() -> Result<Self, SchedulerError> {
        let handle = Handle::try_current().map_err(SchedulerError::NoRuntime)?;
        Ok(Self { handle })
    }

    /// Bind to an explicit runtime handle.
    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioHandle;

    fn schedule(&self, delay: Duration, task: Task) -> TokioHandle {
        tracing::trace!(delay_ms = delay.as_millis() as u64, "spawning delayed task");

        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        TokioHandle { join }
    }
}

/// Handle to a task spawned by [`TokioScheduler`]
#[derive(Debug)]
pub struct TokioHandle {
    join: JoinHandle<()>,
}

impl ScheduleHandle for TokioHandle {
    fn cancel(&mut self) {
        self.join.abort();
    }
}
