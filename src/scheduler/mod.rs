//! Task scheduling abstraction
//!
//! Delayed work goes through the `Scheduler` trait so visibility logic never
//! touches the wall clock directly:
//! - **`TokioScheduler`**: production implementation, spawns onto a tokio
//!   runtime
//! - **`ManualScheduler`**: virtual clock driven by `advance`, for tests and
//!   frame-polled UI loops

mod error;
mod manual;
mod runtime;

pub use error::SchedulerError;
pub use manual::{ManualHandle, ManualScheduler};
pub use runtime::{TokioHandle, TokioScheduler};

#[cfg(test)]
mod scheduler_tests;

use std::time::Duration;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedules tasks to run after a delay.
///
/// A zero delay means the next tick of the underlying event loop; a task
/// never runs inside the `schedule` call itself.
pub trait Scheduler {
    type Handle: ScheduleHandle;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;
}

/// Handle to a scheduled task.
pub trait ScheduleHandle {
    /// Withdraw the task. No-op once it has fired or been cancelled.
    fn cancel(&mut self);
}
