//! Compare rider counts for the same order stream.
//!
//! Runs the default workday (orders every 5 minutes on average, deliveries
//! averaging 10 minutes, horizon 100 minutes) with 1 through 4 riders on a
//! shared seed and tabulates the outcomes. Set `RUST_LOG=dispatchq=debug`
//! to watch individual admissions and completions.

use dispatchq::{rider_sweep, run_scenarios, SimConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base = SimConfig::default().with_seed(7);
    let scenarios = rider_sweep(&base, &[1, 2, 3, 4]);
    let outcomes = run_scenarios(&scenarios).expect("sweep configs are valid");

    println!(
        "{:<10} {:>9} {:>10} {:>11} {:>11} {:>11} {:>8}",
        "scenario", "served", "mean wait", "mean total", "max queue", "orders/min", "util %"
    );
    for outcome in &outcomes {
        let s = &outcome.snapshot;
        println!(
            "{:<10} {:>9} {:>10.2} {:>11.2} {:>11} {:>11.3} {:>8.1}",
            outcome.label,
            s.completed,
            s.mean_wait,
            s.mean_total_time,
            s.max_queue_length,
            s.throughput,
            s.utilization_pct
        );
    }
}
