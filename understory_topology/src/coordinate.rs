// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar coordinates with an optional elevation.

use core::fmt;

use kurbo::Point;
use understory_strtree::Envelope;

/// A planar position with an optional elevation `z`.
///
/// `z` is NaN when there is no elevation. Equality (`==`) compares `x` and `y`
/// only; use [`Coordinate::equals_3d`] to include elevation.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// X ordinate
    pub x: f64,
    /// Y ordinate
    pub y: f64,
    /// Elevation, NaN if absent
    pub z: f64,
}

impl Coordinate {
    /// A coordinate without elevation.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: f64::NAN }
    }

    /// A coordinate with elevation.
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Whether `x` and `y` match.
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Whether `x`, `y` and `z` match. Two missing elevations are equal.
    pub fn equals_3d(&self, other: &Self) -> bool {
        self.equals_2d(other) && (self.z == other.z || (self.z.is_nan() && other.z.is_nan()))
    }

    /// Planar Euclidean distance.
    pub fn distance(&self, other: &Self) -> f64 {
        self.to_point().distance(other.to_point())
    }

    /// The planar part as a Kurbo point.
    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Degenerate envelope at this position.
    pub const fn envelope(&self) -> Envelope {
        Envelope::from_point(self.x, self.y)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

impl From<Point> for Coordinate {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        c.to_point()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.z.is_nan() {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            write!(f, "({}, {}, {})", self.x, self.y, self.z)
        }
    }
}
