use scheduler::{ConfigError, ProcessDescriptor, SchedulerResult, Time};

/// Timings of one process after a simulation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProcessTimes {
    /// The process these timings belong to.
    pub process: ProcessDescriptor,

    /// Time from arrival to first dispatch.
    pub response: Time,

    /// Time at which the last unit of the burst ran.
    pub finish: Time,
}

impl ProcessTimes {
    /// Time from arrival to completion.
    pub fn turnaround(&self) -> Time {
        self.finish - self.process.arrival
    }

    /// Time spent ready but not running.
    pub fn wait(&self) -> Time {
        self.turnaround() - self.process.burst
    }
}

/// Per-process timings of one policy run, in PID order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    times: Vec<ProcessTimes>,
}

impl SimulationResult {
    pub fn new(times: Vec<ProcessTimes>) -> Self {
        SimulationResult { times }
    }

    pub fn times(&self) -> &[ProcessTimes] {
        &self.times
    }

    /// Averages the timings of every process.
    pub fn summary(&self) -> SchedulerResult<Summary> {
        self.times
            .iter()
            .collect::<MetricsAccumulator>()
            .summary()
    }
}

/// The averages reported for one policy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Summary {
    pub avg_response: f64,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
}

/// Sums per-process timings and turns them into a [`Summary`].
///
/// Sums are kept as integers so the averages do not depend on the order the
/// processes were recorded in.
#[derive(Debug, Default, Clone)]
pub struct MetricsAccumulator {
    count: u64,
    response: u128,
    turnaround: u128,
    wait: u128,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, times: &ProcessTimes) {
        self.count += 1;
        self.response += u128::from(times.response);
        self.turnaround += u128::from(times.turnaround());
        self.wait += u128::from(times.wait());
    }

    /// Arithmetic means over every recorded process.
    pub fn summary(&self) -> SchedulerResult<Summary> {
        if self.count == 0 {
            return Err(ConfigError::NoProcesses.into());
        }
        let count = self.count as f64;
        Ok(Summary {
            avg_response: self.response as f64 / count,
            avg_turnaround: self.turnaround as f64 / count,
            avg_wait: self.wait as f64 / count,
        })
    }
}

impl<'a> Extend<&'a ProcessTimes> for MetricsAccumulator {
    fn extend<I: IntoIterator<Item = &'a ProcessTimes>>(&mut self, iter: I) {
        for times in iter {
            self.record(times);
        }
    }
}

impl<'a> FromIterator<&'a ProcessTimes> for MetricsAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a ProcessTimes>>(iter: I) -> Self {
        let mut accumulator = MetricsAccumulator::new();
        accumulator.extend(iter);
        accumulator
    }
}
