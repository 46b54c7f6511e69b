//! Transition configuration
//!
//! A `Transition` describes one scheduled visibility change: how long to wait
//! and what to call once the flag has been written.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Completion callback, invoked once after the flag write.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Configuration for one scheduled visibility transition
#[derive(Default)]
pub struct Transition {
    /// Delay before the transition applies (zero = next tick)
    pub duration: Duration,

    /// Invoked after the flag write, if present
    pub callback: Option<Callback>,
}

impl Transition {
    /// Transition on the next tick, no callback
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition after `duration`, no callback
    pub fn after(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Attach a completion callback
    pub fn with_callback(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("duration", &self.duration)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// Whether a visible element hides itself
///
/// The shape UI configuration files embed so an element's auto-hide delay is
/// user-configurable. `After` delays map onto `open_for`; `Never` means the
/// element stays up until something closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AutoDismiss {
    /// Element stays visible until explicitly closed
    Never,

    /// Element hides itself after this many milliseconds
    After { duration_ms: u64 },
}

impl Default for AutoDismiss {
    fn default() -> Self {
        Self::After { duration_ms: 4000 }
    }
}

impl AutoDismiss {
    /// The close delay, or `None` when the element never auto-hides
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After { duration_ms } => Some(Duration::from_millis(*duration_ms)),
        }
    }
}
