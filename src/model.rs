//! The dispatch model: an arrival generator feeding a rider pool, with each
//! admitted order running a fixed lifecycle of wait, delivery, release.
//!
//! Both processes are expressed as events. [`ArrivalEvent`] reschedules
//! itself after each exponential inter-arrival delay until the horizon gates
//! it off; each admitted order's lifecycle suspends at most twice, once in
//! the pool's wait queue and once for its delivery duration, the latter as a
//! [`DeliveryCompleteEvent`]. Everything in between happens at a single
//! simulated instant.

use crate::config::SimConfig;
use crate::events::{Event, EventQueue};
use crate::metrics::{MetricsCollector, MetricsSnapshot};
use crate::order::{CompletedOrder, Order};
use crate::pool::{Acquire, RiderPool};
use crate::simulation::{SimState, Simulation};
use crate::time::SimTime;
use crate::variate::VariateSource;
use crate::Result;

use tracing::{debug, info, trace};

/// Shared state of one run: the pool, the variate source, the metrics sink,
/// and the arrival generator's bookkeeping.
#[derive(Debug)]
pub(crate) struct Dispatch {
    horizon: SimTime,
    cancel_prob: f64,
    pool: RiderPool,
    variates: VariateSource,
    metrics: MetricsCollector,
    next_order_id: u64,
    generator_stopped: bool,
}

impl Dispatch {
    fn new(config: &SimConfig) -> Self {
        Self {
            horizon: SimTime::new(config.horizon),
            cancel_prob: config.cancel_prob,
            pool: RiderPool::new(config.riders),
            variates: VariateSource::from_config(config),
            metrics: MetricsCollector::new(),
            next_order_id: 1,
            generator_stopped: false,
        }
    }

    /// Ids are consumed by cancelled arrivals too, keeping them aligned with
    /// the arrival sequence.
    fn allocate_order_id(&mut self) -> u64 {
        let id = self.next_order_id;
        self.next_order_id += 1;
        id
    }
}

// The run ends when the event queue drains: the horizon stops the arrival
// generator from rescheduling itself, and after that only already-admitted
// deliveries remain in flight.
impl SimState for Dispatch {}

/// The arrival generator's wake-up. One execution handles one arrival tick:
/// stop at the horizon, or cancel, or admit and start a lifecycle, then
/// reschedule for the next sampled inter-arrival delay.
#[derive(Debug)]
struct ArrivalEvent;

impl ArrivalEvent {
    fn schedule_next(state: &mut Dispatch, queue: &mut EventQueue<Dispatch>) -> Result {
        let delay = state.variates.interarrival_delay();
        queue.schedule_in(ArrivalEvent, delay)
    }
}

impl Event<Dispatch> for ArrivalEvent {
    fn execute(&mut self, state: &mut Dispatch, queue: &mut EventQueue<Dispatch>) -> Result {
        let now = queue.current_time();
        if now >= state.horizon {
            state.generator_stopped = true;
            debug!(time = now.as_f64(), "horizon reached, no further arrivals");
            return Ok(());
        }

        // The cancellation draw happens on every tick so that the variate
        // sequence is identical across cancel_prob settings.
        let draw = state.variates.cancel_draw();
        if draw < state.cancel_prob {
            let id = state.allocate_order_id();
            state.metrics.record_cancellation();
            trace!(order = id, time = now.as_f64(), "order cancelled before admission");
        } else {
            let order = Order {
                id: state.allocate_order_id(),
                arrival_time: now,
                // Drawn at admission, not at rider assignment: draws then
                // serve the same purpose in every configuration sharing a
                // seed, which keeps scenario sweeps paired.
                service_time: state.variates.service_duration(),
            };
            state.metrics.record_admission();
            debug!(order = order.id, time = now.as_f64(), "order admitted");

            let outcome = state.pool.acquire(order)?;
            state.metrics.sample_queue_length(now, state.pool.queue_len());
            match outcome {
                Acquire::Granted(order) => start_delivery(order, state, queue)?,
                Acquire::Queued => trace!(
                    order = order.id,
                    queued_behind = state.pool.queue_len() - 1,
                    "all riders busy, order waiting"
                ),
            }
        }

        Self::schedule_next(state, queue)
    }
}

/// Tail of an order's lifecycle: the delivery duration has elapsed and the
/// rider comes free.
#[derive(Debug)]
struct DeliveryCompleteEvent {
    order: Order,
    wait: f64,
}

impl Event<Dispatch> for DeliveryCompleteEvent {
    fn execute(&mut self, state: &mut Dispatch, queue: &mut EventQueue<Dispatch>) -> Result {
        let now = queue.current_time();
        let record = CompletedOrder {
            id: self.order.id,
            arrival_time: self.order.arrival_time,
            wait: self.wait,
            service: self.order.service_time,
            completion_time: now,
        };
        debug!(
            order = record.id,
            time = now.as_f64(),
            total = record.total(),
            "delivery completed"
        );
        state.metrics.accumulate_busy(record.service);
        state.metrics.record_completion(record);

        let next = state.pool.release()?;
        state.metrics.sample_queue_length(now, state.pool.queue_len());
        if let Some(next) = next {
            // Handoff at the release instant: the freed rider goes straight
            // to the longest-waiting order.
            start_delivery(next, state, queue)?;
        }
        Ok(())
    }
}

/// A rider has just been assigned to `order`: record its wait and schedule
/// the completion after the delivery duration sampled at admission.
fn start_delivery(order: Order, state: &mut Dispatch, queue: &mut EventQueue<Dispatch>) -> Result {
    let now = queue.current_time();
    let wait = now - order.arrival_time;
    state.metrics.record_wait(wait);
    let service = order.service_time;
    debug!(order = order.id, wait, service, "rider assigned");
    queue.schedule_in(DeliveryCompleteEvent { order, wait }, service)
}

/// Run the kernel once for `config` and return its metrics.
///
/// Validates the configuration, seeds the variate source, schedules the first
/// arrival, and drains the event queue to completion. The horizon gates
/// admissions only; lifecycles admitted before it run to completion even when
/// that pushes the clock past the horizon, so after the run every admitted
/// order has completed.
///
/// # Errors
///
/// A rejected configuration surfaces as [`Error::Config`] before any event is
/// scheduled. Invariant violations during the run abort it with the
/// corresponding error.
///
/// [`Error::Config`]: crate::Error::Config
pub fn run(config: &SimConfig) -> Result<MetricsSnapshot> {
    config.validate()?;
    info!(
        riders = config.riders,
        horizon = config.horizon,
        seed = config.seed,
        "starting dispatch run"
    );

    let mut sim = Simulation::new(Dispatch::new(config), SimTime::ZERO);
    let first_delay = sim.state_mut().variates.interarrival_delay();
    sim.event_queue_mut().schedule_in(ArrivalEvent, first_delay)?;
    sim.run()?;

    debug_assert!(sim.state().generator_stopped);
    debug_assert!(sim.state().pool.is_idle());
    debug_assert!(sim.event_queue().is_empty());

    let end_time = sim.event_queue().current_time();
    let state = sim.into_state();
    let snapshot = state.metrics.snapshot(config);
    info!(
        end_time = end_time.as_f64(),
        admitted = snapshot.admitted,
        completed = snapshot.completed,
        cancelled = snapshot.cancelled,
        "dispatch run complete"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_stops_at_horizon_and_pool_drains() {
        let config = SimConfig::new(1, 50.0).with_seed(3);
        let mut sim = Simulation::new(Dispatch::new(&config), SimTime::ZERO);
        let first_delay = sim.state_mut().variates.interarrival_delay();
        sim.event_queue_mut()
            .schedule_in(ArrivalEvent, first_delay)
            .unwrap();
        sim.run().unwrap();

        assert!(sim.state().generator_stopped);
        assert!(sim.state().pool.is_idle());
        assert!(sim.event_queue().is_empty());
        // Clock may sit past the horizon after the drain, never before the
        // generator's last wake-up.
        assert!(sim.event_queue().current_time() >= SimTime::new(50.0));
    }

    #[test]
    fn cancelled_arrivals_consume_ids() {
        let config = SimConfig::new(2, 50.0).with_cancel_prob(1.0).with_seed(9);
        let mut sim = Simulation::new(Dispatch::new(&config), SimTime::ZERO);
        let first_delay = sim.state_mut().variates.interarrival_delay();
        sim.event_queue_mut()
            .schedule_in(ArrivalEvent, first_delay)
            .unwrap();
        sim.run().unwrap();

        let state = sim.into_state();
        let cancelled = state.next_order_id - 1;
        assert!(cancelled > 0);
        let snapshot = state.metrics.snapshot(&config);
        assert_eq!(snapshot.cancelled, cancelled);
        assert_eq!(snapshot.admitted, 0);
    }
}
