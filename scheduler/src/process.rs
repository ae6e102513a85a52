use std::ops::Index;

use crate::{ConfigError, Pid, SchedulerResult, Time};

/// Maximum number of processes accepted when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// A process as read from the input. Never mutated once loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProcessDescriptor {
    /// Position in the input sequence.
    pub pid: Pid,
    /// Time at which the process becomes eligible for dispatch.
    pub arrival: Time,
    /// Total CPU time the process needs. Always positive.
    pub burst: Time,
}

/// The immutable batch of processes one simulation runs over.
///
/// Processes are stored in input order, so a [`Pid`] indexes the set
/// directly. A second, stable arrival-sorted order is kept for the policies
/// that walk processes as they arrive: equal arrivals stay in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSet {
    processes: Vec<ProcessDescriptor>,
    arrival_order: Vec<Pid>,
}

impl ProcessSet {
    /// Builds a set from `(arrival, burst)` pairs with [`DEFAULT_CAPACITY`].
    pub fn new<I>(pairs: I) -> SchedulerResult<ProcessSet>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        ProcessSet::with_capacity(pairs, DEFAULT_CAPACITY)
    }

    /// Builds a set from `(arrival, burst)` pairs, accepting at most
    /// `capacity` processes.
    ///
    /// * `pairs` - one pair per process, in input order.
    /// * `capacity` - the largest accepted number of processes.
    pub fn with_capacity<I>(pairs: I, capacity: usize) -> SchedulerResult<ProcessSet>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let pairs: Vec<(i64, i64)> = pairs.into_iter().collect();
        if pairs.len() > capacity {
            let count = pairs.len();
            return Err(ConfigError::CapacityExceeded { count, capacity }.into());
        }

        let mut processes = Vec::with_capacity(pairs.len());
        for (index, (arrival, burst)) in pairs.into_iter().enumerate() {
            let pid = Pid::new(index);
            let arrival =
                Time::try_from(arrival).map_err(|_| ConfigError::NegativeArrival { pid, arrival })?;
            if burst <= 0 {
                return Err(ConfigError::NonPositiveBurst { pid, burst }.into());
            }
            processes.push(ProcessDescriptor {
                pid,
                arrival,
                burst: burst as Time,
            });
        }

        if processes.is_empty() {
            return Err(ConfigError::NoProcesses.into());
        }

        // The clock never passes the last arrival plus all the work there is.
        let latest = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
        processes
            .iter()
            .try_fold(latest, |total, p| total.checked_add(p.burst))
            .ok_or(ConfigError::ClockOverflow)?;

        let mut arrival_order: Vec<Pid> = processes.iter().map(|p| p.pid).collect();
        arrival_order.sort_by_key(|pid| processes[pid.index()].arrival);

        Ok(ProcessSet {
            processes,
            arrival_order,
        })
    }

    /// Number of processes. Never zero.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessDescriptor> {
        self.processes.get(pid.index())
    }

    /// Processes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessDescriptor> {
        self.processes.iter()
    }

    /// PIDs sorted by arrival, ties in input order.
    pub fn arrival_order(&self) -> &[Pid] {
        &self.arrival_order
    }
}

impl Index<Pid> for ProcessSet {
    type Output = ProcessDescriptor;

    fn index(&self, pid: Pid) -> &Self::Output {
        &self.processes[pid.index()]
    }
}
