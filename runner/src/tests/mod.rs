use std::env;
use std::fs;
use std::num::NonZeroU64;

use processor::{format_report, Simulation};
use scheduler::{Policy, ProcessSet};

use crate::simulate_all;

mod errors;
mod simple;

fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = arguments();
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(format!("../outputs/{folder}/{name}___{quantum}.log"), logs).unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = arguments();
    fs::read_to_string(format!("../outputs/{folder}/{name}___{quantum}.log")).unwrap()
}

/// Compares the detailed report of `simulations` with the reference output.
///
/// Set `WRITE_OUTPUT` to regenerate the reference instead.
fn run(folder: &str, name: &str, simulations: &[Simulation]) {
    let output = format_report(simulations, true);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

/// The Round Robin quantum used by the reference outputs.
fn arguments() -> NonZeroU64 {
    let quantum = env::var("QUANTUM")
        .unwrap_or("4".to_string())
        .parse::<i64>()
        .unwrap();
    scheduler::quantum(quantum).unwrap()
}

fn processes(pairs: &[(i64, i64)]) -> ProcessSet {
    ProcessSet::new(pairs.iter().copied()).unwrap()
}

/// Runs all four policies over `pairs`.
fn simulations(pairs: &[(i64, i64)]) -> Vec<Simulation> {
    simulate_all(&processes(pairs), &Policy::all(arguments())).unwrap()
}
