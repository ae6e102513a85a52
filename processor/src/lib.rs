//! A processor simulation library
//!
//! This is used for replaying a [`ProcessSet`] under a scheduler from the
//! [`scheduler`] crate and measuring how every process fared.

use std::fmt::Display;

use tracing::{debug, debug_span, info};

use scheduler::{
    Policy, ProcessSet, Scheduler, SchedulerError, SchedulerResult, SchedulingDecision,
    StopReason, Time,
};

mod metrics;
mod report;
mod state;

pub use metrics::{MetricsAccumulator, ProcessTimes, SimulationResult, Summary};
pub use report::{format_processes, format_report, format_simulation, format_summary};
pub use state::RunState;

/// Running iteration log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// Clock value when the decision was taken.
    pub start: Time,

    /// Clock value after the decision was carried out.
    pub end: Time,

    /// The action requested by the scheduler.
    pub decision: SchedulingDecision,

    /// The reason that a dispatched process has stopped.
    pub stop_reason: Option<StopReason>,
}

impl Log {
    fn new(
        start: Time,
        end: Time,
        decision: SchedulingDecision,
        stop_reason: Option<StopReason>,
    ) -> Log {
        Log {
            start,
            end,
            decision,
            stop_reason,
        }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{}] {}", self.start, self.end, self.decision)?;
        if let Some(reason) = self.stop_reason {
            write!(f, " -> {}", reason)?;
        }
        Ok(())
    }
}

/// The outcome of running one policy over a process set.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// The name of the policy, as printed in the report.
    pub name: String,

    /// One entry per scheduling decision, in order.
    pub logs: Vec<Log>,

    /// Response and finish time of every process.
    pub result: SimulationResult,

    /// The averaged metrics.
    pub summary: Summary,
}

/// The processor simulator.
///
/// Owns the clock and the per-process bookkeeping of a single run and asks
/// the scheduler what to do until it answers [`SchedulingDecision::Done`].
pub struct Processor<'a, S: Scheduler> {
    scheduler: S,
    state: RunState<'a>,
    logs: Vec<Log>,
}

impl<'a, S: Scheduler> Processor<'a, S> {
    /// Run a scheduler over a process set.
    ///
    /// * `scheduler` - a fresh scheduler built over `processes`.
    /// * `processes` - the batch of processes to replay.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::ProcessSet;
    ///
    /// let processes = ProcessSet::new([(0, 8), (1, 4), (2, 9), (3, 5)]).unwrap();
    /// let simulation = Processor::run(scheduler::srtf(&processes), &processes).unwrap();
    ///
    /// assert_eq!(simulation.summary.avg_wait, 6.5);
    /// ```
    pub fn run(scheduler: S, processes: &'a ProcessSet) -> SchedulerResult<Simulation> {
        let name = scheduler.name();
        let span = debug_span!("simulate", policy = %name);
        let _enter = span.enter();

        let mut processor = Processor {
            scheduler,
            state: RunState::new(processes),
            logs: vec![],
        };
        while processor.step()? {}

        let Processor { state, logs, .. } = processor;
        let result = state.into_result()?;
        let summary = result.summary()?;
        info!(
            policy = %name,
            decisions = logs.len(),
            avg_response = summary.avg_response,
            avg_turnaround = summary.avg_turnaround,
            avg_wait = summary.avg_wait,
            "simulation finished"
        );

        Ok(Simulation {
            name,
            logs,
            result,
            summary,
        })
    }

    /// Carries out one decision. Returns `false` once the scheduler is done.
    fn step(&mut self) -> SchedulerResult<bool> {
        let start = self.state.now();
        let decision = self.scheduler.next(start)?;

        match decision {
            SchedulingDecision::Run { pid, timeslice } => {
                let (ran, reason) = self.state.dispatch(pid, timeslice.get())?;
                debug!(%pid, start, ran, %reason, "dispatched");
                self.logs
                    .push(Log::new(start, self.state.now(), decision, Some(reason)));
                self.scheduler.stop(pid, reason)?;
                Ok(true)
            }
            SchedulingDecision::Idle { until } => {
                self.state.idle_until(until)?;
                debug!(start, until, "idle");
                self.logs.push(Log::new(start, until, decision, None));
                Ok(true)
            }
            SchedulingDecision::Done => {
                if !self.state.is_complete() {
                    return Err(SchedulerError::invariant(
                        "scheduler finished with work left",
                    ));
                }
                self.logs.push(Log::new(start, start, decision, None));
                Ok(false)
            }
        }
    }
}

/// Builds the engine for `policy` and runs it over `processes`.
pub fn simulate(policy: Policy, processes: &ProcessSet) -> SchedulerResult<Simulation> {
    debug!(
        %policy,
        preemptive = policy.is_preemptive(),
        processes = processes.len(),
        "starting simulation"
    );
    Processor::run(policy.scheduler(processes), processes)
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs returned by the [`Processor`].
pub fn format_logs(logs: &[Log]) -> String {
    let mut s = String::new();
    for (iteration, log) in logs.iter().enumerate() {
        s.push_str(&format!(
            "===== Iteration: {} =====\n{}\n",
            iteration + 1,
            log
        ));
    }
    s
}
