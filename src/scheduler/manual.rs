//! Virtual-clock scheduler
//!
//! Holds scheduled tasks in a queue keyed by virtual elapsed time. Nothing
//! fires until `advance` is called, which makes delayed transitions fully
//! deterministic in tests and lets frame-polled UI loops drive timing from
//! their own tick.
//!
//! Due tasks fire ordered by due time, then by insertion order, matching how
//! a single-threaded event loop interleaves them.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{ScheduleHandle, Scheduler, Task};

/// Scheduler driven by an explicit virtual clock
///
/// Cloneable; clones share one queue, so tests can keep a clone to drive
/// time while a timer owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
}

#[derive(Default)]
struct Queue {
    /// Virtual elapsed time since creation
    now: Duration,

    /// Insertion counter for stable firing order
    next_seq: u64,

    entries: Vec<Entry>,
}

struct Entry {
    seq: u64,
    due: Duration,
    task: Task,
}

/// A poisoned lock only means a task panicked mid-fire; the queue itself is
/// still coherent, so recover the guard.
fn lock(queue: &Mutex<Queue>) -> MutexGuard<'_, Queue> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        lock(&self.queue).now
    }

    /// Number of tasks waiting to fire
    pub fn pending(&self) -> usize {
        lock(&self.queue).entries.len()
    }

    /// Advance the virtual clock, firing every task that comes due.
    ///
    /// Tasks run outside the internal lock, so a firing task may schedule
    /// further work; anything it queues inside the window fires in the same
    /// call. `advance(Duration::ZERO)` fires zero-delay tasks.
    pub fn advance(&self, delta: Duration) {
        let target = lock(&self.queue).now + delta;

        loop {
            let task = lock(&self.queue).take_next_due(target);
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Queue {
    /// Pop the earliest entry due within `target`, advancing `now` to it.
    /// Sets `now` to `target` once nothing is left to fire.
    fn take_next_due(&mut self, target: Duration) -> Option<Task> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= target)
            .min_by_key(|&(_, e)| (e.due, e.seq))
            .map(|(i, _)| i);

        match idx {
            Some(i) => {
                let entry = self.entries.remove(i);
                self.now = self.now.max(entry.due);
                Some(entry.task)
            }
            None => {
                self.now = target;
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Task) -> ManualHandle {
        let mut q = lock(&self.queue);
        let seq = q.next_seq;
        q.next_seq += 1;
        let due = q.now + delay;

        tracing::trace!(seq, due_ms = due.as_millis() as u64, "queueing task");
        q.entries.push(Entry { seq, due, task });

        ManualHandle {
            queue: self.queue.clone(),
            seq,
        }
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = lock(&self.queue);
        f.debug_struct("ManualScheduler")
            .field("now", &q.now)
            .field("pending", &q.entries.len())
            .finish()
    }
}

/// Handle to a task queued on a [`ManualScheduler`]
pub struct ManualHandle {
    queue: Arc<Mutex<Queue>>,
    seq: u64,
}

impl ScheduleHandle for ManualHandle {
    fn cancel(&mut self) {
        lock(&self.queue).entries.retain(|e| e.seq != self.seq);
    }
}

impl fmt::Debug for ManualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualHandle").field("seq", &self.seq).finish()
    }
}
