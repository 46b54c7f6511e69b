//! Error types for scheduler construction

use thiserror::Error;

/// Errors when binding a scheduler to its runtime
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("no tokio runtime available to schedule on")]
    NoRuntime(#[source] tokio::runtime::TryCurrentError),
}
