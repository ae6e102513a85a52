use crate::{format_logs, Simulation, SimulationResult, Summary};

/// Formats the result block of one policy.
///
/// The block is the policy name, one line of averages rounded to two
/// decimals, and a blank separator line.
pub fn format_summary(name: &str, summary: &Summary) -> String {
    format!(
        "{}\nAvg. Resp.: {:.2}, Avg. T.A.: {:.2}, Avg. Wait: {:.2}\n\n",
        name, summary.avg_response, summary.avg_turnaround, summary.avg_wait
    )
}

/// Formats the per-process timings as a table, one row per PID.
pub fn format_processes(result: &SimulationResult) -> String {
    let mut s = String::from("PID\tARRIVAL\tBURST\tRESP\tFINISH\tT.A.\tWAIT\n");
    for times in result.times() {
        s.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            times.process.pid,
            times.process.arrival,
            times.process.burst,
            times.response,
            times.finish,
            times.turnaround(),
            times.wait()
        ));
    }
    s
}

/// Formats one simulation.
///
/// * `detailed` - also print the decision timeline and the process table
///                ahead of the averages.
pub fn format_simulation(simulation: &Simulation, detailed: bool) -> String {
    let mut s = String::new();
    if detailed {
        s.push_str(&format_logs(&simulation.logs));
        s.push_str(&format_processes(&simulation.result));
    }
    s.push_str(&format_summary(&simulation.name, &simulation.summary));
    s
}

/// Formats every simulation in the order given.
pub fn format_report(simulations: &[Simulation], detailed: bool) -> String {
    simulations
        .iter()
        .map(|simulation| format_simulation(simulation, detailed))
        .collect()
}
