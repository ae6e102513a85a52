use std::io::{self, Read};
use std::panic;
use std::thread;

use anyhow::{Context, Result};
use tracing::info;

use processor::{format_report, simulate, Simulation};
use scheduler::{Policy, ProcessSet, SchedulerResult};

mod config;
mod input;
mod tracer;

use config::Config;

fn main() -> Result<()> {
    tracer::init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    let report = run(&config, io::stdin().lock())?;
    print!("{report}");
    Ok(())
}

/// Loads the process set from `input` and returns the report for `config`.
pub fn run<R: Read>(config: &Config, input: R) -> Result<String> {
    let pairs = input::read_pairs(input).context("failed to read processes")?;
    let processes =
        ProcessSet::with_capacity(pairs, config.capacity).context("invalid process set")?;
    info!(
        processes = processes.len(),
        quantum = config.quantum.get(),
        "process set loaded"
    );

    let simulations =
        simulate_all(&processes, &Policy::all(config.quantum)).context("simulation failed")?;

    Ok(format_report(&simulations, config.timeline))
}

/// Runs every policy over `processes`, each on its own thread.
///
/// The policies share nothing but the read-only process set. Results come
/// back in the order of `policies`.
pub fn simulate_all(processes: &ProcessSet, policies: &[Policy]) -> SchedulerResult<Vec<Simulation>> {
    thread::scope(|s| {
        let handles: Vec<_> = policies
            .iter()
            .map(|&policy| s.spawn(move || simulate(policy, processes)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    })
}

#[cfg(test)]
mod tests;
