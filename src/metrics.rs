use crate::config::SimConfig;
use crate::order::CompletedOrder;
use crate::time::SimTime;

/// One point on the queue-length timeline, taken immediately after a pool
/// mutation (every acquire and every release).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueSample {
    pub time: SimTime,
    pub queue_length: usize,
}

/// Passive sink the lifecycle events write into as they execute.
///
/// Owns no process state and has no control flow of its own; correctness of
/// the accumulated numbers falls out of correct event ordering. Folded into a
/// [`MetricsSnapshot`] once the run drains.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    orders: Vec<CompletedOrder>,
    waits: Vec<f64>,
    queue_timeline: Vec<QueueSample>,
    busy_time: f64,
    admitted: u64,
    cancelled: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_admission(&mut self) {
        self.admitted += 1;
    }

    pub fn record_cancellation(&mut self) {
        self.cancelled += 1;
    }

    /// Recorded at the instant a rider is assigned, before service begins.
    pub fn record_wait(&mut self, wait: f64) {
        self.waits.push(wait);
    }

    pub fn record_completion(&mut self, order: CompletedOrder) {
        self.orders.push(order);
    }

    pub fn sample_queue_length(&mut self, time: SimTime, queue_length: usize) {
        self.queue_timeline.push(QueueSample { time, queue_length });
    }

    /// Rider-minutes spent delivering, summed pool-wide.
    pub fn accumulate_busy(&mut self, duration: f64) {
        self.busy_time += duration;
    }

    /// Fold the raw samples into derived metrics. Pure function of the
    /// recorded sequences and the run's configuration.
    pub fn snapshot(self, config: &SimConfig) -> MetricsSnapshot {
        let completed = self.orders.len() as u64;
        let totals: Vec<f64> = self.orders.iter().map(CompletedOrder::total).collect();
        let delayed = self.waits.iter().filter(|&&w| w > 0.0).count();
        let delayed_fraction = if self.waits.is_empty() {
            0.0
        } else {
            delayed as f64 / self.waits.len() as f64
        };
        let max_queue_length = self
            .queue_timeline
            .iter()
            .map(|sample| sample.queue_length)
            .max()
            .unwrap_or(0);
        // Accumulated service time over capacity * horizon. The drain phase
        // can push completions past the horizon, so this slightly misstates
        // true busy time; known approximation, kept as-is.
        let utilization_pct = (self.busy_time / (f64::from(config.riders) * config.horizon)
            * 100.0)
            .clamp(0.0, 100.0);

        MetricsSnapshot {
            admitted: self.admitted,
            completed,
            cancelled: self.cancelled,
            mean_wait: mean(&self.waits),
            mean_total_time: mean(&totals),
            max_queue_length,
            throughput: completed as f64 / config.horizon,
            utilization_pct,
            delayed_fraction,
            busy_time: self.busy_time,
            wait_times: self.waits,
            orders: self.orders,
            queue_timeline: self.queue_timeline,
        }
    }
}

/// Everything a run reports, produced once at run end and read-only
/// thereafter. The sole output of the kernel; rendering of any kind stays
/// with the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Orders instantiated by the arrival generator.
    pub admitted: u64,
    /// Orders whose delivery finished. Equal to `admitted` after a full
    /// drain: every admitted order completes.
    pub completed: u64,
    /// Arrivals cancelled before admission.
    pub cancelled: u64,
    /// Mean minutes from arrival to rider assignment; 0 when nothing completed.
    pub mean_wait: f64,
    /// Mean minutes from arrival to delivery handoff; 0 when nothing completed.
    pub mean_total_time: f64,
    /// Largest wait-queue length observed on the timeline.
    pub max_queue_length: usize,
    /// Completed orders per minute of horizon.
    pub throughput: f64,
    /// Busy time over `riders * horizon`, as a percentage in `[0, 100]`.
    /// Slightly approximate when the drain phase extends past the horizon.
    pub utilization_pct: f64,
    /// Fraction of served orders that waited at all.
    pub delayed_fraction: f64,
    /// Pool-wide rider-minutes spent delivering.
    pub busy_time: f64,
    /// Per-order waits in rider-assignment order.
    pub wait_times: Vec<f64>,
    /// Full per-order records in completion order.
    pub orders: Vec<CompletedOrder>,
    /// Chronological `(time, queue_length)` samples.
    pub queue_timeline: Vec<QueueSample>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(id: u64, arrival: f64, wait: f64, service: f64) -> CompletedOrder {
        CompletedOrder {
            id,
            arrival_time: SimTime::new(arrival),
            wait,
            service,
            completion_time: SimTime::new(arrival + wait + service),
        }
    }

    fn config() -> SimConfig {
        SimConfig::new(2, 100.0)
    }

    #[test]
    fn empty_run_yields_zeroed_aggregates() {
        let snapshot = MetricsCollector::new().snapshot(&config());
        assert_eq!(snapshot.completed, 0);
        assert_eq!(snapshot.mean_wait, 0.0);
        assert_eq!(snapshot.mean_total_time, 0.0);
        assert_eq!(snapshot.max_queue_length, 0);
        assert_eq!(snapshot.throughput, 0.0);
        assert_eq!(snapshot.utilization_pct, 0.0);
        assert_eq!(snapshot.delayed_fraction, 0.0);
    }

    #[test]
    fn aggregates_follow_recorded_orders() {
        let mut collector = MetricsCollector::new();
        for (id, wait, service) in [(1, 0.0, 8.0), (2, 4.0, 6.0), (3, 2.0, 10.0)] {
            collector.record_admission();
            collector.record_wait(wait);
            collector.record_completion(completed(id, 0.0, wait, service));
            collector.accumulate_busy(service);
        }

        let snapshot = collector.snapshot(&config());
        assert_eq!(snapshot.admitted, 3);
        assert_eq!(snapshot.completed, 3);
        assert_eq!(snapshot.mean_wait, 2.0);
        assert_eq!(snapshot.mean_total_time, 10.0);
        assert_eq!(snapshot.throughput, 0.03);
        assert_eq!(snapshot.busy_time, 24.0);
        // 24 busy minutes over 2 riders * 100 minutes
        assert_eq!(snapshot.utilization_pct, 12.0);
        assert_eq!(snapshot.delayed_fraction, 2.0 / 3.0);
    }

    #[test]
    fn max_queue_length_tracks_timeline_peak() {
        let mut collector = MetricsCollector::new();
        for (t, n) in [(1.0, 0), (2.0, 1), (3.0, 4), (4.0, 2)] {
            collector.sample_queue_length(SimTime::new(t), n);
        }
        let snapshot = collector.snapshot(&config());
        assert_eq!(snapshot.max_queue_length, 4);
        assert_eq!(snapshot.queue_timeline.len(), 4);
    }

    #[test]
    fn utilization_is_clamped() {
        let mut collector = MetricsCollector::new();
        collector.accumulate_busy(10_000.0);
        let snapshot = collector.snapshot(&config());
        assert_eq!(snapshot.utilization_pct, 100.0);
    }
}
