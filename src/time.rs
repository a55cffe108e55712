use ordered_float::OrderedFloat;
use std::fmt;
use std::ops::{Add, Sub};

/// Virtual clock time, in simulated minutes.
///
/// A thin wrapper over [`OrderedFloat<f64>`] so that clock values are totally
/// ordered and usable as the sort key of the event queue. The clock is
/// strictly non-decreasing over a run: it only advances when the runner pops
/// the next event, and events scheduled for equal times execute in the order
/// they were scheduled.
///
/// [`OrderedFloat<f64>`]: ordered_float::OrderedFloat
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimTime(OrderedFloat<f64>);

impl SimTime {
    /// The start of every run.
    pub const ZERO: SimTime = SimTime(OrderedFloat(0.0));

    pub fn new(minutes: f64) -> Self {
        Self(OrderedFloat(minutes))
    }

    /// The raw clock value.
    pub fn as_f64(self) -> f64 {
        self.0.into_inner()
    }
}

impl From<f64> for SimTime {
    fn from(minutes: f64) -> Self {
        Self::new(minutes)
    }
}

impl Add<f64> for SimTime {
    type Output = Self;

    fn add(self, delay: f64) -> Self {
        Self::new(self.as_f64() + delay)
    }
}

/// Difference between two clock values, as a plain duration.
impl Sub for SimTime {
    type Output = f64;

    fn sub(self, earlier: Self) -> f64 {
        self.as_f64() - earlier.as_f64()
    }
}

impl fmt::Debug for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SimTime({})", self.as_f64())
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.3}", self.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_clock_value() {
        assert!(SimTime::new(1.5) < SimTime::new(2.0));
        assert!(SimTime::ZERO <= SimTime::new(0.0));
        assert_eq!(SimTime::new(3.0), SimTime::new(3.0));
    }

    #[test]
    fn add_offsets_and_sub_measures() {
        let t = SimTime::new(10.0) + 2.5;
        assert_eq!(t, SimTime::new(12.5));
        assert_eq!(t - SimTime::new(10.0), 2.5);
    }
}
