use crate::time::SimTime;

/// An admitted order moving through the system. Created by the arrival
/// generator; carried through the pool and the lifecycle events until its
/// delivery completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    /// 1-based, monotonically increasing. Cancelled arrivals consume an id
    /// too, so ids stay aligned with the arrival sequence.
    pub id: u64,
    pub arrival_time: SimTime,
    /// Delivery duration, in minutes. Sampled at admission rather than at
    /// rider assignment so that every draw serves the same purpose across
    /// runs sharing a seed, keeping scenario comparisons paired.
    pub service_time: f64,
}

/// The immutable record of a finished delivery, handed to the metrics
/// collector. The in-flight [`Order`] is not retained past this point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedOrder {
    pub id: u64,
    pub arrival_time: SimTime,
    /// Minutes spent between arrival and rider assignment. Zero exactly when
    /// a rider was free at the instant of arrival.
    pub wait: f64,
    /// Minutes the assigned rider spent on the delivery.
    pub service: f64,
    pub completion_time: SimTime,
}

impl CompletedOrder {
    /// Wait plus service: arrival to handoff.
    pub fn total(&self) -> f64 {
        self.wait + self.service
    }
}
