use std::num::NonZeroU64;

use crate::SchedulingDecision::{Done, Idle, Run};
use crate::{
    Pid, ProcessSet, Scheduler, SchedulerError, SchedulerResult, SchedulingDecision, StopReason,
    Time,
};

/// First come, first served.
///
/// Walks the arrival order once. Every process runs its whole burst as soon
/// as the processor is free and the process has arrived.
pub struct Fcfs<'a> {
    processes: &'a ProcessSet,
    cursor: usize,
    running: Option<Pid>,
}

impl<'a> Fcfs<'a> {
    pub fn new(processes: &'a ProcessSet) -> Self {
        Fcfs {
            processes,
            cursor: 0,
            running: None,
        }
    }
}

impl Scheduler for Fcfs<'_> {
    fn name(&self) -> String {
        String::from("First Come, First Served")
    }

    fn next(&mut self, now: Time) -> SchedulerResult<SchedulingDecision> {
        if let Some(pid) = self.running {
            return Err(SchedulerError::invariant(format!(
                "process {pid} is still running"
            )));
        }

        let Some(&pid) = self.processes.arrival_order().get(self.cursor) else {
            return Ok(Done);
        };

        let process = self.processes[pid];
        if process.arrival > now {
            return Ok(Idle {
                until: process.arrival,
            });
        }

        let timeslice = NonZeroU64::new(process.burst)
            .ok_or_else(|| SchedulerError::invariant(format!("process {pid} has no burst")))?;
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
                self.cursor += 1;
                Ok(())
            }
            StopReason::Expired { .. } => Err(SchedulerError::invariant(format!(
                "non-preemptive process {pid} was preempted"
            ))),
        }
    }
}
