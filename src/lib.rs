//! # Overview
//!
//! dispatchq is a discrete-event simulation of a capacity-constrained
//! courier dispatch queue: a fixed pool of riders serves a stream of
//! randomly timed delivery orders under a first-in-first-out discipline,
//! producing reproducible timing and utilization metrics.
//!
//! The kernel is a serial event-driven simulation:
//!
//! * [`EventQueue`] orders pending resumptions by `(due_time, sequence)`, so
//!   simultaneous events execute in the order they were scheduled and every
//!   run is deterministic for a fixed configuration and seed.
//! * [`Simulation`] pops events one at a time, advancing the [`SimTime`]
//!   clock monotonically; exactly one event body executes between suspension
//!   points.
//! * [`RiderPool`] implements the acquire/queue/release protocol: requests
//!   are granted immediately while riders are free and otherwise wait FIFO
//!   for the next release.
//! * [`run()`] wires the arrival generator and per-order lifecycles together
//!   for one configuration and returns a [`MetricsSnapshot`], the kernel's
//!   sole output. No file or network I/O happens inside a run.
//!
//! Scenario comparison sits on top: [`run_scenarios()`] re-runs the kernel
//! per labeled [`Scenario`] and hands back the outcomes for tabulation.
//!
//! ```no_run
//! use dispatchq::{run, SimConfig};
//!
//! let config = SimConfig::new(2, 100.0).with_seed(1);
//! let snapshot = run(&config)?;
//! println!(
//!     "{} orders served, mean wait {:.2} min",
//!     snapshot.completed, snapshot.mean_wait
//! );
//! # Ok::<(), dispatchq::Error>(())
//! ```
//!
//! [`run()`]: run
//! [`run_scenarios()`]: run_scenarios

mod config;
mod error;
mod events;
mod metrics;
mod model;
mod order;
mod pool;
mod scenario;
mod simulation;
mod time;
mod variate;

pub use config::SimConfig;
pub use error::{ConfigError, Error, Result};
pub use events::{Event, EventQueue};
pub use metrics::{MetricsCollector, MetricsSnapshot, QueueSample};
pub use model::run;
pub use order::{CompletedOrder, Order};
pub use pool::{Acquire, RiderPool};
pub use scenario::{rider_sweep, run_scenarios, Scenario, ScenarioOutcome};
pub use simulation::{SimState, Simulation};
pub use time::SimTime;
pub use variate::VariateSource;
