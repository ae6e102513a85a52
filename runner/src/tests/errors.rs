use scheduler::{ConfigError, Pid, ProcessSet, SchedulerError};

use crate::config::Config;
use crate::input::read_pairs;
use crate::run;

fn load(input: &str, capacity: usize) -> Result<ProcessSet, SchedulerError> {
    ProcessSet::with_capacity(read_pairs(input.as_bytes()).unwrap(), capacity)
}

#[test]
pub fn empty_input() {
    let err = load("", 100).unwrap_err();
    assert_eq!(err, SchedulerError::Configuration(ConfigError::NoProcesses));
    assert_eq!(err.to_string(), "configuration error: no processes supplied");
}

#[test]
pub fn garbage_before_first_pair() {
    let err = load("abc 0 5\n", 100).unwrap_err();
    assert_eq!(err, SchedulerError::Configuration(ConfigError::NoProcesses));
}

#[test]
pub fn too_many_processes() {
    let input = "0 1\n1 1\n2 1\n3 1\n";
    let err = load(input, 3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "configuration error: process count 4 exceeds capacity 3"
    );
    assert_eq!(load(input, 4).unwrap().len(), 4);
}

#[test]
pub fn malformed_tail_is_ignored() {
    let processes = load("0 5\n1 3\n2 -\n", 100).unwrap();
    assert_eq!(processes.len(), 2);
}

#[test]
pub fn invalid_burst() {
    let err = load("0 5\n1 0\n", 100).unwrap_err();
    assert_eq!(
        err,
        SchedulerError::Configuration(ConfigError::NonPositiveBurst {
            pid: Pid::new(1),
            burst: 0
        })
    );
}

#[test]
pub fn non_positive_quantum() {
    let err = Config::parse(Some("0"), None, false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "configuration error: time quantum must be positive, got 0"
    );
}

#[test]
pub fn configured_capacity_applies() {
    let config = Config::parse(None, Some("2"), false).unwrap();
    let err = load("0 1 0 1 0 1", config.capacity).unwrap_err();
    assert_eq!(
        err,
        SchedulerError::Configuration(ConfigError::CapacityExceeded {
            count: 3,
            capacity: 2
        })
    );
}

#[test]
pub fn run_reports_error_chain() {
    let config = Config::parse(None, Some("1"), false).unwrap();
    let err = run(&config, "0 1 1 1".as_bytes()).unwrap_err();

    assert_eq!(err.to_string(), "invalid process set");
    assert_eq!(
        err.root_cause().to_string(),
        "process count 2 exceeds capacity 1"
    );
    assert_eq!(
        err.downcast_ref::<SchedulerError>(),
        Some(&SchedulerError::Configuration(ConfigError::CapacityExceeded {
            count: 2,
            capacity: 1
        }))
    );
}

#[test]
pub fn run_survives_invalid_utf8() {
    let config = Config::default();
    let report = run(&config, &b"0 3\n\xfe\xff 1\n"[..]).unwrap();

    assert!(report.starts_with("First Come, First Served\n"), "{report}");
    assert!(report.contains("Avg. Resp.: 0.00, Avg. T.A.: 3.00, Avg. Wait: 0.00"));
}
