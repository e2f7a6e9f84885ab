// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned 2D envelopes.

use crate::bounds::Bounds;
use crate::math::hypot;

/// Axis-aligned bounding box in 2D, or the null envelope.
///
/// The null envelope is stored with inverted infinite extents, so folding
/// [`Envelope::union`] over a sequence starting from [`Envelope::null`] works
/// without special cases. Any envelope with `max < min` on an axis is null.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

impl Envelope {
    /// Create a new envelope from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create the envelope spanned by two arbitrary corner points.
    pub fn from_points(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Create a degenerate envelope covering a single point.
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// The null envelope.
    pub const fn null() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Return true if this is the null envelope (or inverted). Assumes no NaN.
    pub fn is_null(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Width, or 0 for the null envelope.
    pub fn width(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height, or 0 for the null envelope.
    pub fn height(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Area, or 0 for the null envelope.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// X midpoint.
    pub fn centre_x(&self) -> f64 {
        0.5 * (self.min_x + self.max_x)
    }

    /// Y midpoint.
    pub fn centre_y(&self) -> f64 {
        0.5 * (self.min_y + self.max_y)
    }

    /// Whether the envelopes overlap. Touching edges count as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// Whether `other` lies entirely inside this envelope (boundary included).
    pub fn contains(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Whether the point lies inside this envelope (boundary included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        !self.is_null() && x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Grow this envelope to cover `other`.
    pub fn expand_to_include(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// Grow this envelope to cover the point.
    pub fn expand_to_include_point(&mut self, x: f64, y: f64) {
        *self = self.union(&Self::from_point(x, y));
    }

    /// Smallest envelope covering both. The null envelope is the identity.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_null() {
            return *other;
        }
        if other.is_null() {
            return *self;
        }
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Minimum Euclidean distance between the two envelopes; 0 if they intersect.
    ///
    /// This is a lower bound on the distance between anything contained in the two
    /// envelopes, which is what nearest-neighbour pruning relies on.
    /// Involving the null envelope yields infinity.
    pub fn distance(&self, other: &Self) -> f64 {
        if self.is_null() || other.is_null() {
            return f64::INFINITY;
        }
        if self.intersects(other) {
            return 0.0;
        }
        let dx = if self.max_x < other.min_x {
            other.min_x - self.max_x
        } else if self.min_x > other.max_x {
            self.min_x - other.max_x
        } else {
            0.0
        };
        let dy = if self.max_y < other.min_y {
            other.min_y - self.max_y
        } else if self.min_y > other.max_y {
            self.min_y - other.max_y
        } else {
            0.0
        };
        if dx == 0.0 {
            return dy;
        }
        if dy == 0.0 {
            return dx;
        }
        hypot(dx, dy)
    }

    /// Maximum distance between any point of `self` and any point of `other`:
    /// the diagonal of their union.
    pub fn max_distance(&self, other: &Self) -> f64 {
        let u = self.union(other);
        if u.is_null() {
            return f64::INFINITY;
        }
        hypot(u.max_x - u.min_x, u.max_y - u.min_y)
    }
}

impl Bounds for Envelope {
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
