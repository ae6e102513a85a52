//! Simulated time and arrival tracking.
//!
//! Time never advances one unit at a time. It either moves by the length of
//! a dispatched slice or jumps straight to the next arrival, so the cost of a
//! simulation does not depend on the size of the bursts.

use crate::{Pid, ProcessSet, SchedulerError, SchedulerResult, Time};

/// The logical clock of one simulation run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Clock {
    now: Time,
}

impl Clock {
    pub fn new() -> Clock {
        Clock { now: 0 }
    }

    pub fn now(&self) -> Time {
        self.now
    }

    /// Moves the clock forward by `amount` and returns the new time.
    pub fn advance(&mut self, amount: Time) -> SchedulerResult<Time> {
        self.now = self
            .now
            .checked_add(amount)
            .ok_or_else(|| SchedulerError::invariant("clock overflow"))?;
        Ok(self.now)
    }

    /// Jumps to `until`, which must lie strictly in the future.
    pub fn jump_to(&mut self, until: Time) -> SchedulerResult<()> {
        if until <= self.now {
            return Err(SchedulerError::invariant(format!(
                "clock cannot jump from {} to {}",
                self.now, until
            )));
        }
        self.now = until;
        Ok(())
    }
}

/// A cursor over the arrival order of a [`ProcessSet`].
///
/// Every process is admitted exactly once, in arrival order, as soon as the
/// clock reaches its arrival time.
#[derive(Debug, Clone)]
pub struct ArrivalIndex<'a> {
    processes: &'a ProcessSet,
    cursor: usize,
}

impl<'a> ArrivalIndex<'a> {
    pub fn new(processes: &'a ProcessSet) -> ArrivalIndex<'a> {
        ArrivalIndex {
            processes,
            cursor: 0,
        }
    }

    /// Admits every process not admitted yet whose arrival is `<= now`.
    ///
    /// The returned PIDs are in arrival order, ties in input order.
    pub fn admit(&mut self, now: Time) -> &'a [Pid] {
        let processes = self.processes;
        let order = processes.arrival_order();
        let start = self.cursor;
        let waiting = order[start..].partition_point(|&pid| processes[pid].arrival <= now);
        self.cursor += waiting;
        &order[start..self.cursor]
    }

    /// Arrival time of the next process that has not been admitted.
    pub fn peek(&self) -> Option<Time> {
        self.processes
            .arrival_order()
            .get(self.cursor)
            .map(|&pid| self.processes[pid].arrival)
    }

    /// Returns `true` once every process has been admitted.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.processes.len()
    }
}

/// Finds the process with the smallest arrival among those not marked done.
///
/// Ties go to the smallest PID. Callers use the result to fast-forward the
/// clock when nothing is ready; calling it when every process is done is a
/// bug in the caller.
///
/// * `done` - one flag per process, indexed by PID.
/// * `processes` - the process set `done` refers to.
pub fn earliest_arrival(done: &[bool], processes: &ProcessSet) -> SchedulerResult<(Pid, Time)> {
    if done.len() != processes.len() {
        return Err(SchedulerError::invariant(format!(
            "{} done markers for {} processes",
            done.len(),
            processes.len()
        )));
    }

    processes
        .arrival_order()
        .iter()
        .find(|pid| !done[pid.index()])
        .map(|&pid| (pid, processes[pid].arrival))
        .ok_or_else(|| SchedulerError::invariant("earliest arrival requested on a finished set"))
}
