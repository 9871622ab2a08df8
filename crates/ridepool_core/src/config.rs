//! Scenario-wide dispatch weights consumed directly by the core.
//!
//! The full configuration file (paths, date ranges, synthetic-demand knobs)
//! lives in `ridepool_io`; this struct is the slice of it the dispatcher,
//! enumerator, feasibility checker, and scorer actually read.

use crate::time::Minutes;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchWeights {
    pub delay_factor: f64,
    pub balance_factor: f64,
    pub pooling_factor: f64,
    pub distance_factor: f64,
    /// The scenario-wide delay cap (minutes) enforced by the feasibility
    /// checker and used to bound the enumerator's relevant window.
    pub delay_max: u32,
    /// Minutes a vehicle idles at every stop, added to every leg.
    pub standing_time: Minutes,
}

impl Default for DispatchWeights {
    fn default() -> Self {
        DispatchWeights {
            delay_factor: 1.0,
            balance_factor: 1.0,
            pooling_factor: 1.0,
            distance_factor: 1.0,
            delay_max: 10,
            standing_time: 1,
        }
    }
}

impl DispatchWeights {
    pub fn with_delay_factor(mut self, value: f64) -> Self {
        self.delay_factor = value;
        self
    }

    pub fn with_balance_factor(mut self, value: f64) -> Self {
        self.balance_factor = value;
        self
    }

    pub fn with_pooling_factor(mut self, value: f64) -> Self {
        self.pooling_factor = value;
        self
    }

    pub fn with_distance_factor(mut self, value: f64) -> Self {
        self.distance_factor = value;
        self
    }

    pub fn with_delay_max(mut self, value: u32) -> Self {
        self.delay_max = value;
        self
    }

    pub fn with_standing_time(mut self, value: Minutes) -> Self {
        self.standing_time = value;
        self
    }

    pub fn delay_max_minutes(&self) -> Minutes {
        self.delay_max as Minutes
    }
}
