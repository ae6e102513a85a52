use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::num::NonZeroU64;

use tracing::trace;

use crate::clock::{earliest_arrival, ArrivalIndex};
use crate::SchedulingDecision::{Done, Idle, Run};
use crate::{
    Pid, ProcessSet, Scheduler, SchedulerError, SchedulerResult, SchedulingDecision, StopReason,
    Time,
};

/// Shortest job first, non-preemptive.
///
/// Among the processes that have arrived, the one with the smallest burst
/// runs to completion. Ties go to the smallest PID.
pub struct Sjf<'a> {
    processes: &'a ProcessSet,
    arrivals: ArrivalIndex<'a>,
    ready: BinaryHeap<Reverse<(Time, Pid)>>,
    executed: Vec<bool>,
    completed: usize,
    running: Option<Pid>,
}

impl<'a> Sjf<'a> {
    pub fn new(processes: &'a ProcessSet) -> Self {
        Sjf {
            processes,
            arrivals: ArrivalIndex::new(processes),
            ready: BinaryHeap::new(),
            executed: vec![false; processes.len()],
            completed: 0,
            running: None,
        }
    }
}

impl Scheduler for Sjf<'_> {
    fn name(&self) -> String {
        String::from("Shortest Job First")
    }

    fn next(&mut self, now: Time) -> SchedulerResult<SchedulingDecision> {
        if let Some(pid) = self.running {
            return Err(SchedulerError::invariant(format!(
                "process {pid} is still running"
            )));
        }

        for &pid in self.arrivals.admit(now) {
            trace!(%pid, now, "admitted");
            self.ready.push(Reverse((self.processes[pid].burst, pid)));
        }

        if let Some(Reverse((burst, pid))) = self.ready.pop() {
            let timeslice = NonZeroU64::new(burst)
                .ok_or_else(|| SchedulerError::invariant(format!("process {pid} has no burst")))?;
            self.running = Some(pid);
            return Ok(Run { pid, timeslice });
        }

        if self.completed == self.processes.len() {
            return Ok(Done);
        }

        let (_, until) = earliest_arrival(&self.executed, self.processes)?;
        Ok(Idle { until })
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
                self.executed[pid.index()] = true;
                self.completed += 1;
                Ok(())
            }
            StopReason::Expired { .. } => Err(SchedulerError::invariant(format!(
                "non-preemptive process {pid} was preempted"
            ))),
        }
    }
}
