use std::env;
use std::num::NonZeroU64;

use scheduler::{ConfigError, SchedulerResult, DEFAULT_CAPACITY, DEFAULT_QUANTUM};

/// Environment variable holding the maximum number of processes.
pub const CAPACITY_VAR: &str = "SCHED_CAPACITY";

/// Environment variable that turns on the timeline and process tables.
pub const TIMELINE_VAR: &str = "SCHED_TIMELINE";

/// Runtime configuration of the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Round Robin time quantum.
    pub quantum: NonZeroU64,

    /// Largest number of processes accepted from the input.
    pub capacity: usize,

    /// Print every decision and the per-process timings, not just averages.
    pub timeline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quantum: DEFAULT_QUANTUM,
            capacity: DEFAULT_CAPACITY,
            timeline: false,
        }
    }
}

impl Config {
    /// Reads the quantum from the first command line argument and the rest
    /// from the environment.
    pub fn from_env() -> SchedulerResult<Config> {
        Config::parse(
            env::args().nth(1).as_deref(),
            env::var(CAPACITY_VAR).ok().as_deref(),
            env::var_os(TIMELINE_VAR).is_some(),
        )
    }

    pub fn parse(
        quantum: Option<&str>,
        capacity: Option<&str>,
        timeline: bool,
    ) -> SchedulerResult<Config> {
        let mut config = Config {
            timeline,
            ..Config::default()
        };

        if let Some(quantum) = quantum {
            let value = quantum
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidQuantum(quantum.to_string()))?;
            config.quantum = scheduler::quantum(value)?;
        }

        if let Some(capacity) = capacity {
            config.capacity = capacity
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&capacity| capacity > 0)
                .ok_or_else(|| ConfigError::InvalidCapacity(capacity.to_string()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheduler::SchedulerError;

    #[test]
    fn defaults() {
        let config = Config::parse(None, None, false).unwrap();
        assert_eq!(config.quantum.get(), 100);
        assert_eq!(config.capacity, 100);
        assert!(!config.timeline);
    }

    #[test]
    fn explicit_values() {
        let config = Config::parse(Some("4"), Some("250"), true).unwrap();
        assert_eq!(config.quantum.get(), 4);
        assert_eq!(config.capacity, 250);
        assert!(config.timeline);
    }

    #[test]
    fn quantum_must_be_a_positive_integer() {
        assert_eq!(
            Config::parse(Some("0"), None, false).unwrap_err(),
            SchedulerError::Configuration(ConfigError::NonPositiveQuantum(0))
        );
        assert_eq!(
            Config::parse(Some("-5"), None, false).unwrap_err(),
            SchedulerError::Configuration(ConfigError::NonPositiveQuantum(-5))
        );
        assert_eq!(
            Config::parse(Some("ten"), None, false).unwrap_err(),
            SchedulerError::Configuration(ConfigError::InvalidQuantum(String::from("ten")))
        );
    }

    #[test]
    fn capacity_must_be_positive() {
        assert!(Config::parse(None, Some("0"), false).is_err());
        assert!(Config::parse(None, Some("lots"), false).is_err());
    }
}
