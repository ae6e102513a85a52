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

/// Shortest remaining time first, preemptive.
///
/// The arrived process with the least remaining work runs until it either
/// finishes or the next process arrives, whichever comes first. At that
/// boundary the choice is made again, so a shorter newcomer preempts it.
pub struct Srtf<'a> {
    processes: &'a ProcessSet,
    arrivals: ArrivalIndex<'a>,
    ready: BinaryHeap<Reverse<(Time, Pid)>>,
    remaining: Vec<Time>,
    finished: Vec<bool>,
    completed: usize,
    running: Option<Pid>,
}

impl<'a> Srtf<'a> {
    pub fn new(processes: &'a ProcessSet) -> Self {
        Srtf {
            processes,
            arrivals: ArrivalIndex::new(processes),
            ready: BinaryHeap::new(),
            remaining: processes.iter().map(|p| p.burst).collect(),
            finished: vec![false; processes.len()],
            completed: 0,
            running: None,
        }
    }
}

impl Scheduler for Srtf<'_> {
    fn name(&self) -> String {
        String::from("Shortest Remaining Time First")
    }

    fn next(&mut self, now: Time) -> SchedulerResult<SchedulingDecision> {
        if let Some(pid) = self.running {
            return Err(SchedulerError::invariant(format!(
                "process {pid} is still running"
            )));
        }

        for &pid in self.arrivals.admit(now) {
            trace!(%pid, now, "admitted");
            self.ready.push(Reverse((self.remaining[pid.index()], pid)));
        }

        let Some(Reverse((remaining, pid))) = self.ready.pop() else {
            if self.completed == self.processes.len() {
                return Ok(Done);
            }
            let (_, until) = earliest_arrival(&self.finished, self.processes)?;
            return Ok(Idle { until });
        };

        // Everything with arrival <= now is admitted, so the next
        // preemption point is the next admission.
        let slice = match self.arrivals.peek() {
            Some(arrival) => remaining.min(arrival - now),
            None => remaining,
        };
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
                self.finished[pid.index()] = true;
                self.completed += 1;
            }
            StopReason::Expired { remaining } => {
                if remaining == 0 || remaining >= self.remaining[pid.index()] {
                    return Err(SchedulerError::invariant(format!(
                        "process {pid} made no progress"
                    )));
                }
                self.remaining[pid.index()] = remaining;
                self.ready.push(Reverse((remaining, pid)));
            }
        }
        Ok(())
    }
}
