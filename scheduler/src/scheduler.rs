use std::fmt::{self, Display};
use std::num::NonZeroU64;

use crate::SchedulerResult;

/// A point on the logical simulation clock, or a duration on it.
pub type Time = u64;

/// The PID of a process
///
/// PIDs are the 0-based position of the process in the input sequence.
/// They break every tie between otherwise equal processes: the lower PID wins.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    /// Position of the process in the input sequence.
    pub fn index(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The action that the scheduler asks the dispatcher to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// Run the process with PID `pid` for a maximum of `timeslice` time units.
    Run { pid: Pid, timeslice: NonZeroU64 },

    /// Nothing is ready. Move the clock forward to `until`, the next arrival.
    Idle { until: Time },

    /// There are no more processes to schedule.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run { pid, timeslice } => {
                write!(f, "Run {} for {} units", pid, timeslice)
            }
            SchedulingDecision::Idle { until } => {
                write!(f, "Idle until {}", until)
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The reason that a dispatched process has stopped and the dispatcher
/// has called the scheduler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The process used up its whole burst and will never run again.
    Completed,

    /// The timeslice allocated for the process has expired and the process
    /// has been preempted.
    Expired {
        /// The burst time that the process still needs.
        remaining: Time,
    },
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Completed => {
                write!(f, "Completed")
            }
            StopReason::Expired { remaining } => {
                write!(f, "Expired, remaining {remaining}")
            }
        }
    }
}

/// The trait that every scheduling policy has to implement.
///
/// The dispatcher alternates between asking for a decision with
/// [`Scheduler::next`] and, after running a process, reporting back
/// with [`Scheduler::stop`]. The dispatcher owns the clock and the
/// per-process accounting; the scheduler only owns its ready structure.
pub trait Scheduler: Send {
    /// Name printed at the top of the policy's report block.
    fn name(&self) -> String;

    /// Returns the action that the dispatcher has to perform at time `now`.
    fn next(&mut self, now: Time) -> SchedulerResult<SchedulingDecision>;

    /// The scheduler is informed about the stopping of the process it
    /// dispatched last, and the reason.
    fn stop(&mut self, pid: Pid, reason: StopReason) -> SchedulerResult<()>;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn next(&mut self, now: Time) -> SchedulerResult<SchedulingDecision> {
        (**self).next(now)
    }

    fn stop(&mut self, pid: Pid, reason: StopReason) -> SchedulerResult<()> {
        (**self).stop(pid, reason)
    }
}
