// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single intersection point on an edge.

use core::cmp::Ordering;
use core::fmt;

use crate::coordinate::Coordinate;

/// A point where something crosses or touches an edge.
///
/// The position along the edge is `(segment_index, distance)`: the segment starting
/// at vertex `segment_index`, and how far along that segment the point lies. Equality
/// and ordering use this position only, never the coordinate.
#[derive(Copy, Clone, Debug)]
pub struct EdgeIntersection {
    /// The intersection point.
    pub coordinate: Coordinate,
    /// Index of the segment containing the point.
    pub segment_index: usize,
    /// Distance along the segment from its start vertex.
    pub distance: f64,
}

impl EdgeIntersection {
    /// Create an intersection.
    pub const fn new(coordinate: Coordinate, segment_index: usize, distance: f64) -> Self {
        Self {
            coordinate,
            segment_index,
            distance,
        }
    }

    /// Compare this intersection's position with `(segment_index, distance)`.
    pub fn compare_to(&self, segment_index: usize, distance: f64) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then_with(|| compare_distance(self.distance, distance))
    }

    /// Whether the intersection sits at the first or last vertex of an edge whose last
    /// segment is `max_segment_index`.
    pub fn is_end_point(&self, max_segment_index: usize) -> bool {
        (self.segment_index == 0 && self.distance == 0.0) || self.segment_index == max_segment_index
    }

    pub(crate) fn key(&self) -> IntersectionKey {
        IntersectionKey {
            segment_index: self.segment_index,
            distance: self.distance,
        }
    }
}

impl PartialEq for EdgeIntersection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeIntersection {}

impl PartialOrd for EdgeIntersection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeIntersection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other.segment_index, other.distance)
    }
}

impl fmt::Display for EdgeIntersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seg # = {} dist = {}",
            self.coordinate, self.segment_index, self.distance
        )
    }
}

/// Map key for an intersection position.
#[derive(Copy, Clone, Debug)]
pub(crate) struct IntersectionKey {
    pub(crate) segment_index: usize,
    pub(crate) distance: f64,
}

impl PartialEq for IntersectionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IntersectionKey {}

impl PartialOrd for IntersectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntersectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| compare_distance(self.distance, other.distance))
    }
}

/// Numeric order; `-0.0 == 0.0`, NaN sorts after everything.
fn compare_distance(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ei(seg: usize, dist: f64) -> EdgeIntersection {
        EdgeIntersection::new(Coordinate::new(seg as f64, dist), seg, dist)
    }

    #[test]
    fn ordered_by_segment_then_distance() {
        assert!(ei(0, 5.0) < ei(1, 0.0));
        assert!(ei(1, 0.25) < ei(1, 0.5));
        assert_eq!(ei(2, 0.0).compare_to(2, -0.0), Ordering::Equal);
        assert_eq!(ei(2, 0.5).compare_to(2, 0.25), Ordering::Greater);
    }

    #[test]
    fn equality_ignores_coordinate() {
        let a = EdgeIntersection::new(Coordinate::new(0.0, 0.0), 3, 0.5);
        let b = EdgeIntersection::new(Coordinate::new(9.0, 9.0), 3, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn end_points() {
        assert!(ei(0, 0.0).is_end_point(4));
        assert!(!ei(0, 0.1).is_end_point(4));
        assert!(ei(4, 0.0).is_end_point(4));
        assert!(!ei(2, 0.0).is_end_point(4));
    }
}
