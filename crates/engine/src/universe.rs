//! Discretized domain shared by the linguistic variables.

use crate::error::ConfigError;
use serde::Serialize;

/// Lower bound of the default universe.
pub const DEFAULT_MIN: f64 = 0.0;
/// Upper bound of the default universe.
pub const DEFAULT_MAX: f64 = 100.0;
/// Default sample count: 101 points, step 1.0 over [0, 100].
pub const DEFAULT_RESOLUTION: usize = 101;
/// Largest accepted sample count.
pub const MAX_RESOLUTION: usize = 1_000_001;

/// A closed interval `[min, max]` sampled at `resolution` evenly spaced points.
///
/// Both bounds are sample points. Immutable once built; variables on the same
/// domain share one instance behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Universe {
    min: f64,
    max: f64,
    resolution: usize,
}

impl Universe {
    /// Build a universe, rejecting `min >= max`, non-finite bounds and sample
    /// counts outside `2..=MAX_RESOLUTION`.
    pub fn new(min: f64, max: f64, resolution: usize) -> Result<Self, ConfigError> {
        if !min.is_finite()
            || !max.is_finite()
            || min >= max
            || !(2..=MAX_RESOLUTION).contains(&resolution)
        {
            return Err(ConfigError::InvalidUniverse {
                min,
                max,
                resolution,
            });
        }
        Ok(Self {
            min,
            max,
            resolution,
        })
    }

    /// `[0, 100]` with the given sample count.
    pub fn percent(resolution: usize) -> Result<Self, ConfigError> {
        Self::new(DEFAULT_MIN, DEFAULT_MAX, resolution)
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of sample points.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Distance between neighbouring samples.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.resolution - 1) as f64
    }

    /// The `i`-th sample point. The last index maps exactly to `max`.
    pub fn point(&self, i: usize) -> f64 {
        if i + 1 >= self.resolution {
            return self.max;
        }
        self.min + i as f64 * self.step()
    }

    /// All sample points in ascending order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.resolution).map(move |i| self.point(i))
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}
