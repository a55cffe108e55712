use crate::error::ConfigError;

/// Parameters for one simulation run.
///
/// Validated up front by [`validate()`]: a bad value is rejected before any
/// event is scheduled, which keeps a failed configuration distinct from a
/// structurally successful run that happens to admit zero orders.
///
/// The defaults match the classic two-rider workday: orders arrive every five
/// minutes on average and take ten minutes on average to deliver.
///
/// [`validate()`]: SimConfig::validate
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of interchangeable riders in the pool. Must be at least 1.
    pub riders: u32,
    /// Virtual time after which no new orders are admitted. Orders already
    /// admitted still run to completion past this point.
    pub horizon: f64,
    /// Mean of the exponential inter-arrival distribution, in minutes.
    pub mean_interarrival: f64,
    /// Mean of the exponential delivery-duration distribution, in minutes.
    pub mean_service: f64,
    /// Probability that an arriving order is cancelled before admission.
    pub cancel_prob: f64,
    /// Seed for the run's random number generator. Two runs with the same
    /// configuration and seed produce identical metrics.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            riders: 2,
            horizon: 100.0,
            mean_interarrival: 5.0,
            mean_service: 10.0,
            cancel_prob: 0.0,
            seed: 1,
        }
    }
}

impl SimConfig {
    pub fn new(riders: u32, horizon: f64) -> Self {
        Self {
            riders,
            horizon,
            ..Self::default()
        }
    }

    pub fn with_riders(mut self, riders: u32) -> Self {
        self.riders = riders;
        self
    }

    pub fn with_mean_interarrival(mut self, minutes: f64) -> Self {
        self.mean_interarrival = minutes;
        self
    }

    pub fn with_mean_service(mut self, minutes: f64) -> Self {
        self.mean_service = minutes;
        self
    }

    pub fn with_cancel_prob(mut self, probability: f64) -> Self {
        self.cancel_prob = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every parameter, reporting the first offending value.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] variant naming the rejected field. In
    /// particular a rider capacity of zero is a rejection, never a run with
    /// zero throughput.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.riders < 1 {
            return Err(ConfigError::Capacity(self.riders));
        }
        if self.horizon <= 0.0 || self.horizon.is_nan() {
            return Err(ConfigError::Horizon(self.horizon));
        }
        if self.mean_interarrival <= 0.0 || self.mean_interarrival.is_nan() {
            return Err(ConfigError::MeanInterarrival(self.mean_interarrival));
        }
        if self.mean_service <= 0.0 || self.mean_service.is_nan() {
            return Err(ConfigError::MeanService(self.mean_service));
        }
        if !(0.0..=1.0).contains(&self.cancel_prob) {
            return Err(ConfigError::CancelProb(self.cancel_prob));
        }
        Ok(())
    }
}
