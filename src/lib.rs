pub mod scheduler;
pub mod visibility;

pub use scheduler::{
    ManualScheduler, ScheduleHandle, Scheduler, SchedulerError, Task, TokioScheduler,
};
pub use visibility::{AutoDismiss, Callback, Transition, VisibilityFlag, VisibilityTimer};
