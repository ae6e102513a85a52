//! A CPU scheduling simulation library.
//!
//! This library provides the process model, the logical clock and the
//! policy engines used to replay a fixed batch of processes under
//! First-Come-First-Served, Shortest-Job-First, Shortest-Remaining-Time-First
//! and Round Robin scheduling.
//!

use std::fmt::{self, Display};
use std::num::NonZeroU64;

mod error;
mod process;
mod scheduler;

pub mod clock;
pub mod schedulers;

pub use crate::error::{ConfigError, SchedulerError, SchedulerResult};
pub use crate::process::{ProcessDescriptor, ProcessSet, DEFAULT_CAPACITY};
pub use crate::scheduler::{Pid, Scheduler, SchedulingDecision, StopReason, Time};

use schedulers::{Fcfs, RoundRobin, Sjf, Srtf};

/// Round Robin quantum used when none is configured.
pub const DEFAULT_QUANTUM: NonZeroU64 = match NonZeroU64::new(100) {
    Some(quantum) => quantum,
    None => panic!("default quantum is zero"),
};

/// Returns a structure that implements the `Scheduler` trait with a first come, first served policy
pub fn fcfs(processes: &ProcessSet) -> impl Scheduler + '_ {
    Fcfs::new(processes)
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive shortest job first policy
pub fn sjf(processes: &ProcessSet) -> impl Scheduler + '_ {
    Sjf::new(processes)
}

/// Returns a structure that implements the `Scheduler` trait with a shortest remaining time first policy
pub fn srtf(processes: &ProcessSet) -> impl Scheduler + '_ {
    Srtf::new(processes)
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `quantum` - the time quanta that a process can run before it is preempted
pub fn round_robin(processes: &ProcessSet, quantum: NonZeroU64) -> impl Scheduler + '_ {
    RoundRobin::new(processes, quantum)
}

/// Validates a raw quantum value.
pub fn quantum(value: i64) -> SchedulerResult<NonZeroU64> {
    u64::try_from(value)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(|| ConfigError::NonPositiveQuantum(value).into())
}

/// The scheduling policies, in the order they are reported.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin { quantum: NonZeroU64 },
}

impl Policy {
    /// Every policy, Round Robin configured with `quantum`.
    pub fn all(quantum: NonZeroU64) -> [Policy; 4] {
        [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::Srtf,
            Policy::RoundRobin { quantum },
        ]
    }

    /// Builds a fresh engine for this policy over `processes`.
    pub fn scheduler<'a>(&self, processes: &'a ProcessSet) -> Box<dyn Scheduler + 'a> {
        match *self {
            Policy::Fcfs => Box::new(fcfs(processes)),
            Policy::Sjf => Box::new(sjf(processes)),
            Policy::Srtf => Box::new(srtf(processes)),
            Policy::RoundRobin { quantum } => Box::new(round_robin(processes, quantum)),
        }
    }

    /// Returns `true` if the policy may stop a process before it completes.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Srtf | Policy::RoundRobin { .. })
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "fcfs"),
            Policy::Sjf => write!(f, "sjf"),
            Policy::Srtf => write!(f, "srtf"),
            Policy::RoundRobin { quantum } => write!(f, "round-robin-{quantum}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantum_must_be_positive() {
        assert_eq!(quantum(4).unwrap().get(), 4);
        assert_eq!(
            quantum(0).unwrap_err(),
            SchedulerError::Configuration(ConfigError::NonPositiveQuantum(0))
        );
        assert_eq!(
            quantum(-3).unwrap_err(),
            SchedulerError::Configuration(ConfigError::NonPositiveQuantum(-3))
        );
    }

    #[test]
    fn policies_are_reported_in_fixed_order() {
        let processes = ProcessSet::new([(0, 1)]).unwrap();
        let names: Vec<String> = Policy::all(quantum(7).unwrap())
            .iter()
            .map(|policy| policy.scheduler(&processes).name())
            .collect();
        assert_eq!(
            names,
            vec![
                "First Come, First Served",
                "Shortest Job First",
                "Shortest Remaining Time First",
                "Round Robin with Time Quantum of 7",
            ]
        );
    }
}
