// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional closed intervals.

use crate::bounds::Bounds;

/// Closed interval `[min, max]` on the real line, or the null interval.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Lower end
    pub min: f64,
    /// Upper end
    pub max: f64,
}

impl Default for Interval {
    fn default() -> Self {
        Self::null()
    }
}

impl Interval {
    /// Create an interval from its two ends, in either order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The null interval.
    pub const fn null() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Whether this is the null interval.
    pub fn is_null(&self) -> bool {
        self.max < self.min
    }

    /// Midpoint.
    pub fn centre(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    /// Length, or 0 for the null interval.
    pub fn width(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Whether `x` lies in the interval.
    pub fn contains_value(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Whether the intervals overlap (shared endpoints count).
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min > self.max || other.max < self.min)
    }

    /// Smallest interval covering both.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_null() {
            return *other;
        }
        if other.is_null() {
            return *self;
        }
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Bounds for Interval {
    fn null() -> Self {
        Self::null()
    }

    fn is_null(&self) -> bool {
        Self::is_null(self)
    }

    fn union(&self, other: &Self) -> Self {
        Self::union(self, other)
    }

    fn intersects(&self, other: &Self) -> bool {
        Self::intersects(self, other)
    }
}
