use thiserror::Error;

use crate::Pid;

/// Result returned by every fallible scheduler operation.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised while building or running a simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The simulation cannot start with the supplied input.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A policy engine or the dispatcher broke one of its own rules.
    ///
    /// This is a bug, never a property of the input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SchedulerError {
    pub fn invariant(message: impl Into<String>) -> SchedulerError {
        SchedulerError::InvariantViolation(message.into())
    }
}

/// Rejected configuration or input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no processes supplied")]
    NoProcesses,

    #[error("process count {count} exceeds capacity {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },

    #[error("time quantum must be positive, got {0}")]
    NonPositiveQuantum(i64),

    #[error("time quantum is not an integer: {0:?}")]
    InvalidQuantum(String),

    #[error("process capacity is not a positive integer: {0:?}")]
    InvalidCapacity(String),

    #[error("process {pid}: arrival must be non-negative, got {arrival}")]
    NegativeArrival { pid: Pid, arrival: i64 },

    #[error("process {pid}: burst must be positive, got {burst}")]
    NonPositiveBurst { pid: Pid, burst: i64 },

    #[error("latest arrival plus total burst overflows the simulation clock")]
    ClockOverflow,
}
