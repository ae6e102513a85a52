use scheduler::clock::Clock;
use scheduler::{Pid, ProcessSet, SchedulerError, SchedulerResult, StopReason, Time};

use crate::metrics::{ProcessTimes, SimulationResult};

/// The mutable bookkeeping of one policy run.
///
/// Created fresh for every run and consumed by [`RunState::into_result`],
/// so nothing carries over from one policy to the next.
#[derive(Debug)]
pub struct RunState<'a> {
    processes: &'a ProcessSet,
    clock: Clock,
    remaining: Vec<Time>,
    response: Vec<Option<Time>>,
    finish: Vec<Option<Time>>,
    completed: usize,
}

impl<'a> RunState<'a> {
    pub fn new(processes: &'a ProcessSet) -> Self {
        RunState {
            processes,
            clock: Clock::new(),
            remaining: processes.iter().map(|p| p.burst).collect(),
            response: vec![None; processes.len()],
            finish: vec![None; processes.len()],
            completed: 0,
        }
    }

    pub fn now(&self) -> Time {
        self.clock.now()
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Runs `pid` for at most `timeslice` units.
    ///
    /// Records the response time on the first dispatch and the finish time
    /// when the burst is used up. Returns how long the process actually ran
    /// and why it stopped.
    pub fn dispatch(&mut self, pid: Pid, timeslice: Time) -> SchedulerResult<(Time, StopReason)> {
        let now = self.clock.now();
        let process = *self
            .processes
            .get(pid)
            .ok_or_else(|| SchedulerError::invariant(format!("unknown process {pid}")))?;
        if process.arrival > now {
            return Err(SchedulerError::invariant(format!(
                "process {pid} dispatched at {now} before its arrival at {}",
                process.arrival
            )));
        }

        let remaining = self.remaining[pid.index()];
        if remaining == 0 {
            return Err(SchedulerError::invariant(format!(
                "finished process {pid} dispatched again"
            )));
        }

        self.response[pid.index()].get_or_insert(now - process.arrival);

        let ran = timeslice.min(remaining);
        let end = self.clock.advance(ran)?;
        let remaining = remaining - ran;
        self.remaining[pid.index()] = remaining;

        if remaining == 0 {
            self.finish[pid.index()] = Some(end);
            self.completed += 1;
            Ok((ran, StopReason::Completed))
        } else {
            Ok((ran, StopReason::Expired { remaining }))
        }
    }

    /// Fast-forwards the idle processor to `until`.
    pub fn idle_until(&mut self, until: Time) -> SchedulerResult<()> {
        self.clock.jump_to(until)
    }

    /// Turns the recorded times into a [`SimulationResult`].
    pub fn into_result(self) -> SchedulerResult<SimulationResult> {
        let times = self
            .processes
            .iter()
            .map(|process| {
                let pid = process.pid;
                match (self.response[pid.index()], self.finish[pid.index()]) {
                    (Some(response), Some(finish)) => Ok(ProcessTimes {
                        process: *process,
                        response,
                        finish,
                    }),
                    _ => Err(SchedulerError::invariant(format!(
                        "process {pid} never finished"
                    ))),
                }
            })
            .collect::<SchedulerResult<Vec<_>>>()?;

        Ok(SimulationResult::new(times))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_dispatch_sets_response_once() {
        let processes = ProcessSet::new([(0, 5), (2, 3)]).unwrap();
        let mut state = RunState::new(&processes);

        let (ran, reason) = state.dispatch(Pid::new(0), 3).unwrap();
        assert_eq!(ran, 3);
        assert_eq!(reason, StopReason::Expired { remaining: 2 });

        state.dispatch(Pid::new(1), 10).unwrap();
        assert_eq!(state.now(), 6);

        let (ran, reason) = state.dispatch(Pid::new(0), 10).unwrap();
        assert_eq!(ran, 2);
        assert_eq!(reason, StopReason::Completed);
        assert!(state.is_complete());

        let result = state.into_result().unwrap();
        assert_eq!(result.times()[0].response, 0);
        assert_eq!(result.times()[0].finish, 8);
        assert_eq!(result.times()[1].response, 1);
        assert_eq!(result.times()[1].finish, 6);
    }

    #[test]
    fn early_dispatch_is_a_bug() {
        let processes = ProcessSet::new([(4, 1)]).unwrap();
        let mut state = RunState::new(&processes);
        assert!(matches!(
            state.dispatch(Pid::new(0), 1),
            Err(SchedulerError::InvariantViolation(_))
        ));
        assert!(state.dispatch(Pid::new(7), 1).is_err());
    }

    #[test]
    fn unfinished_run_has_no_result() {
        let processes = ProcessSet::new([(0, 4)]).unwrap();
        let mut state = RunState::new(&processes);
        state.dispatch(Pid::new(0), 1).unwrap();
        assert!(state.into_result().is_err());
    }
}
