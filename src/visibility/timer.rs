//! Visibility timer
//!
//! Holds the visibility flag and the at-most-one pending scheduled
//! transition. Every operation cancels the outstanding transition before
//! scheduling its own, so overlapping requests resolve deterministically:
//! the newest request wins.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::scheduler::{ScheduleHandle, Scheduler, SchedulerError, TokioScheduler};

use super::Transition;

/// Cloneable view of a visibility flag
///
/// Render threads hold a clone and read it each frame; the owning timer
/// performs the writes.
#[derive(Debug, Clone, Default)]
pub struct VisibilityFlag {
    open: Arc<AtomicBool>,
}

impl VisibilityFlag {
    /// Whether the element should currently render
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub(crate) fn set(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
    }
}

/// Bounded-visibility state for a single UI element
///
/// The flag starts closed. `open_for` shows the element immediately and
/// schedules the close; `open_in` / `close_in` schedule the corresponding
/// transition without touching the flag first. Dropping the timer cancels
/// whatever is pending.
pub struct VisibilityTimer<S: Scheduler = TokioScheduler> {
    flag: VisibilityFlag,
    scheduler: S,
    pending: Option<S::Handle>,
}

impl VisibilityTimer<TokioScheduler> {
    /// Create a timer scheduling on the current tokio runtime
    pub fn new() -> Result<Self, SchedulerError> {
        Ok(Self::with_scheduler(TokioScheduler::current()?))
    }
}

impl<S: Scheduler> VisibilityTimer<S> {
    /// Create a timer on an explicit scheduler
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            flag: VisibilityFlag::default(),
            scheduler,
            pending: None,
        }
    }

    /// Whether the element should currently render
    pub fn is_open(&self) -> bool {
        self.flag.is_open()
    }

    /// Cloneable read handle for render threads
    pub fn flag(&self) -> VisibilityFlag {
        self.flag.clone()
    }

    /// Open immediately, then close after the transition's delay.
    ///
    /// The open is observable before this returns; the close and the
    /// callback run later, from the scheduler.
    pub fn open_for(&mut self, transition: Transition) {
        self.cancel();
        self.flag.set(true);
        tracing::debug!(
            close_in_ms = transition.duration.as_millis() as u64,
            "opened, close scheduled"
        );
        self.pending = Some(self.schedule_transition(false, transition));
    }

    /// Open after the transition's delay. No immediate effect.
    pub fn open_in(&mut self, transition: Transition) {
        self.cancel();
        tracing::debug!(
            delay_ms = transition.duration.as_millis() as u64,
            "open scheduled"
        );
        self.pending = Some(self.schedule_transition(true, transition));
    }

    /// Close after the transition's delay. No immediate effect.
    ///
    /// The callback fires even when the flag is already closed.
    pub fn close_in(&mut self, transition: Transition) {
        self.cancel();
        tracing::debug!(
            delay_ms = transition.duration.as_millis() as u64,
            "close scheduled"
        );
        self.pending = Some(self.schedule_transition(false, transition));
    }

    /// Withdraw the pending transition, leaving the flag as-is.
    ///
    /// No-op when nothing is pending or the transition already fired.
    pub fn cancel(&mut self) {
        if let Some(mut handle) = self.pending.take() {
            handle.cancel();
        }
    }

    /// Withdraw the pending transition and close immediately
    pub fn reset(&mut self) {
        self.cancel();
        self.flag.set(false);
    }

    fn schedule_transition(&self, open: bool, transition: Transition) -> S::Handle {
        let Transition { duration, callback } = transition;
        let flag = self.flag.clone();

        self.scheduler.schedule(
            duration,
            Box::new(move || {
                // Flag write first: the callback observes the new state
                flag.set(open);
                if let Some(callback) = callback {
                    callback();
                }
            }),
        )
    }
}

impl<S: Scheduler> Drop for VisibilityTimer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<S: Scheduler> fmt::Debug for VisibilityTimer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityTimer")
            .field("is_open", &self.is_open())
            .finish()
    }
}
