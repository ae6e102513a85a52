use std::collections::VecDeque;
use std::num::NonZeroU64;

use tracing::trace;

use crate::clock::ArrivalIndex;
use crate::SchedulingDecision::{Done, Idle, Run};
use crate::{
    Pid, ProcessSet, Scheduler, SchedulerError, SchedulerResult, SchedulingDecision, StopReason,
    Time,
};

/// Round robin with a fixed quantum and a FIFO ready queue.
///
/// A preempted process goes to the tail of the queue, but only after every
/// process that arrived during its slice (or exactly when the slice ended).
pub struct RoundRobin<'a> {
    processes: &'a ProcessSet,
    arrivals: ArrivalIndex<'a>,
    ready_queue: VecDeque<Pid>,
    remaining: Vec<Time>,
    quantum: NonZeroU64,
    preempted: Option<Pid>,
    completed: usize,
    running: Option<Pid>,
}

impl<'a> RoundRobin<'a> {
    pub fn new(processes: &'a ProcessSet, quantum: NonZeroU64) -> Self {
        RoundRobin {
            processes,
            arrivals: ArrivalIndex::new(processes),
            ready_queue: VecDeque::new(),
            remaining: processes.iter().map(|p| p.burst).collect(),
            quantum,
            preempted: None,
            completed: 0,
            running: None,
        }
    }
}

impl Scheduler for RoundRobin<'_> {
    fn name(&self) -> String {
        format!("Round Robin with Time Quantum of {}", self.quantum)
    }

    fn next(&mut self, now: Time) -> SchedulerResult<SchedulingDecision> {
        if let Some(pid) = self.running {
            return Err(SchedulerError::invariant(format!(
                "process {pid} is still running"
            )));
        }

        for &pid in self.arrivals.admit(now) {
            trace!(%pid, now, "admitted");
            self.ready_queue.push_back(pid);
        }
        if let Some(pid) = self.preempted.take() {
            self.ready_queue.push_back(pid);
        }

        let Some(pid) = self.ready_queue.pop_front() else {
            if self.completed == self.processes.len() {
                return Ok(Done);
            }
            if self.arrivals.is_exhausted() {
                return Err(SchedulerError::invariant(
                    "ready queue empty with no arrivals left",
                ));
            }
            let until = self.arrivals.peek().ok_or_else(|| {
                SchedulerError::invariant("arrival index has no next arrival")
            })?;
            return Ok(Idle { until });
        };

        let slice = self.remaining[pid.index()].min(self.quantum.get());
        let timeslice = NonZeroU64::new(slice)
            .ok_or_else(|| SchedulerError::invariant(format!("empty slice for process {pid}")))?;

        self.running = Some(pid);
        Ok(Run { pid, timeslice })
    }

    fn stop(&mut self, pid: Pid, reason: StopReason) -> SchedulerResult<()> {
        if self.running != Some(pid) {
            return Err(SchedulerError::invariant(format!(
                "process {pid} stopped but was not dispatched"
            )));
        }
        self.running = None;

        match reason {
            StopReason::Completed => {
                self.remaining[pid.index()] = 0;
                self.completed += 1;
            }
            StopReason::Expired { remaining } => {
                self.remaining[pid.index()] = remaining;
                self.preempted = Some(pid);
            }
        }
        Ok(())
    }
}
