use thiserror::Error;

/// Errors that may be encountered while validating a configuration or
/// executing a simulation run.
///
/// [`Config`] wraps a rejected [`SimConfig`]; it is returned before any event
/// has been scheduled, so a failed configuration never produces a partial
/// run. The remaining variants indicate invariant violations at runtime.
/// These correspond to logical bugs rather than recoverable conditions: a
/// run that hits one aborts instead of continuing with corrupted metrics.
///
/// [`Config`]: Error::Config
/// [`SimConfig`]: crate::SimConfig
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The configuration was rejected before the run started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An event would have been scheduled for a time that has already
    /// passed. Usually means a negative delay was computed at the call
    /// site instead of a non-negative offset from the current clock.
    #[error("event scheduled for time {scheduled} is before current simulation time {now}")]
    BackInTime { scheduled: f64, now: f64 },

    /// The rider pool was asked to hold more busy riders than it has
    /// capacity for.
    #[error("rider pool over capacity: {busy} busy riders with capacity {capacity}")]
    PoolOverCapacity { busy: u32, capacity: u32 },

    /// `release()` was called while no rider was busy.
    #[error("release called on an idle rider pool")]
    IdleRelease,
}

/// A configuration value rejected by [`SimConfig::validate()`].
///
/// Each variant carries the offending value so the rejection message is
/// specific about what was wrong.
///
/// [`SimConfig::validate()`]: crate::SimConfig::validate
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("rider capacity must be at least 1, got {0}")]
    Capacity(u32),

    #[error("simulation horizon must be positive, got {0}")]
    Horizon(f64),

    #[error("mean inter-arrival time must be positive, got {0}")]
    MeanInterarrival(f64),

    #[error("mean service time must be positive, got {0}")]
    MeanService(f64),

    #[error("cancellation probability must lie in [0, 1], got {0}")]
    CancelProb(f64),
}

/// [`std::result::Result`] specialized to [`enum@Error`], defaulting to `()`
/// for the event-execution signatures that only report success or failure.
pub type Result<T = ()> = std::result::Result<T, Error>;
