// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation and point-in-ring predicates.

use crate::coordinate::Coordinate;
use crate::label::Location;

/// Turn direction of a point relative to a directed segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// The point is to the right.
    Clockwise,
    /// The point is on the line through the segment.
    Collinear,
    /// The point is to the left.
    CounterClockwise,
}

impl Orientation {
    /// The opposite turn.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::Collinear => Self::Collinear,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Orientation of `q` relative to the directed segment `p1 -> p2`.
pub fn orientation_index(p1: Coordinate, p2: Coordinate, q: Coordinate) -> Orientation {
    let p1 = p1.to_point();
    let cross = (p2.to_point() - p1).cross(q.to_point() - p1);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Locate `p` relative to a closed ring by counting crossings of a ray towards +X.
///
/// Points on a vertex or segment are on the [`Location::Boundary`]. The ring must
/// repeat its first coordinate at the end; rings with fewer than two points locate
/// everything as exterior.
pub fn locate_point_in_ring(p: Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0_usize;
    for seg in ring.windows(2) {
        let (p1, p2) = (seg[0], seg[1]);
        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        if p == p2 {
            return Location::Boundary;
        }
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
            if p.x >= min_x && p.x <= max_x {
                return Location::Boundary;
            }
            continue;
        }
        // Half-open in y, so a ray through a vertex counts once.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == Orientation::Collinear {
                return Location::Boundary;
            }
            if p2.y < p1.y {
                orient = orient.reverse();
            }
            if orient == Orientation::CounterClockwise {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Whether `p` lies inside or on the boundary of the ring.
pub fn is_point_in_ring(p: Coordinate, ring: &[Coordinate]) -> bool {
    locate_point_in_ring(p, ring) != Location::Exterior
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn ring(pts: &[(f64, f64)]) -> Vec<Coordinate> {
        pts.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn orientation_of_left_right_and_on() {
        let (a, b) = (Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert_eq!(
            orientation_index(a, b, Coordinate::new(0.5, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(orientation_index(a, b, Coordinate::new(0.5, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation_index(a, b, Coordinate::new(5.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn square_locations() {
        let square = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        assert_eq!(locate_point_in_ring(Coordinate::new(5.0, 5.0), &square), Location::Interior);
        assert_eq!(locate_point_in_ring(Coordinate::new(15.0, 5.0), &square), Location::Exterior);
        assert_eq!(locate_point_in_ring(Coordinate::new(-1.0, 5.0), &square), Location::Exterior);
        assert_eq!(locate_point_in_ring(Coordinate::new(10.0, 5.0), &square), Location::Boundary);
        assert_eq!(locate_point_in_ring(Coordinate::new(5.0, 0.0), &square), Location::Boundary);
        assert_eq!(locate_point_in_ring(Coordinate::new(0.0, 10.0), &square), Location::Boundary);
        assert!(is_point_in_ring(Coordinate::new(10.0, 10.0), &square));
        assert!(!is_point_in_ring(Coordinate::new(11.0, 10.0), &square));
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // Diamond with vertices level with the probe.
        let diamond = ring(&[(0.0, 5.0), (5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)]);
        assert_eq!(locate_point_in_ring(Coordinate::new(5.0, 5.0), &diamond), Location::Interior);
        assert_eq!(locate_point_in_ring(Coordinate::new(-3.0, 5.0), &diamond), Location::Exterior);
        // Concave ring where the ray grazes a reflex vertex.
        let notch = ring(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (5.0, 5.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        assert_eq!(locate_point_in_ring(Coordinate::new(2.0, 5.0), &notch), Location::Interior);
        assert_eq!(locate_point_in_ring(Coordinate::new(5.0, 8.0), &notch), Location::Exterior);
    }

    #[test]
    fn degenerate_rings_are_exterior() {
        assert_eq!(locate_point_in_ring(Coordinate::new(0.0, 0.0), &[]), Location::Exterior);
        let single = ring(&[(1.0, 1.0)]);
        assert_eq!(locate_point_in_ring(Coordinate::new(0.0, 0.0), &single), Location::Exterior);
    }
}
