//! Interval arithmetic for ray parameter ranges.
//!
//! Provides closed intervals [min, max] used for ray t-values and bounds checking.

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f64,
    /// Maximum value of the interval
    pub max: f64,
}

impl Interval {
    /// Universe interval constant
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Interval starting at `min` and extending to positive infinity.
    pub fn from_min(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Same interval with its upper bound lowered to `max` if that is tighter.
    pub fn with_max(self, max: f64) -> Self {
        Self::new(self.min, self.max.min(max))
    }
}
