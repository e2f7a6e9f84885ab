// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Labelled polylines that collect intersections and split at them.

use alloc::vec::Vec;
use core::fmt;

use understory_strtree::Envelope;

use crate::coordinate::Coordinate;
use crate::edge_intersection::EdgeIntersection;
use crate::edge_intersection_list::EdgeIntersectionList;
use crate::label::Label;

/// A polyline with a topological label and the intersections found on it so far.
#[derive(Clone, Debug)]
pub struct Edge {
    pts: Vec<Coordinate>,
    label: Label,
    intersections: EdgeIntersectionList,
}

impl Edge {
    /// An edge through `pts` with no recorded intersections.
    pub fn new(pts: Vec<Coordinate>, label: Label) -> Self {
        Self {
            pts,
            label,
            intersections: EdgeIntersectionList::new(),
        }
    }

    /// Vertices in order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.pts
    }

    /// Number of vertices.
    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    /// Index of the last vertex, which is also the segment index of the end point.
    ///
    /// # Panics
    ///
    /// Panics if the edge has no vertices.
    pub fn max_segment_index(&self) -> usize {
        assert!(!self.pts.is_empty(), "edge has no vertices");
        self.pts.len() - 1
    }

    /// The edge's label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Mutable access to the label.
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Intersections recorded so far.
    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.intersections
    }

    /// Record an intersection at `distance` along segment `segment_index`.
    ///
    /// A point equal to the segment's end vertex is stored as the start of the next
    /// segment, so each vertex has exactly one position.
    ///
    /// # Panics
    ///
    /// Panics if `segment_index` is not a vertex index of this edge.
    pub fn add_intersection(
        &mut self,
        coordinate: Coordinate,
        segment_index: usize,
        distance: f64,
    ) -> &EdgeIntersection {
        assert!(
            segment_index < self.pts.len(),
            "segment index {segment_index} out of range for an edge of {} points",
            self.pts.len()
        );
        let next = segment_index + 1;
        if next < self.pts.len() && coordinate.equals_2d(&self.pts[next]) {
            return self.intersections.add(coordinate, next, 0.0);
        }
        self.intersections.add(coordinate, segment_index, distance)
    }

    /// Record an intersection lying on segment `segment_index`, measuring its distance
    /// as the fraction of the segment covered along its longer axis.
    ///
    /// # Panics
    ///
    /// Panics if `segment_index` is not a vertex index of this edge.
    pub fn add_intersection_on_segment(
        &mut self,
        coordinate: Coordinate,
        segment_index: usize,
    ) -> &EdgeIntersection {
        let distance = self.fraction_along(coordinate, segment_index);
        self.add_intersection(coordinate, segment_index, distance)
    }

    fn fraction_along(&self, p: Coordinate, segment_index: usize) -> f64 {
        let p0 = self.pts[segment_index];
        let Some(&p1) = self.pts.get(segment_index + 1) else {
            return 0.0;
        };
        if p.equals_2d(&p0) {
            return 0.0;
        }
        let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
        let t = if dx.max(-dx) >= dy.max(-dy) {
            if dx == 0.0 { 0.0 } else { (p.x - p0.x) / dx }
        } else {
            (p.y - p0.y) / dy
        };
        t.max(0.0).min(1.0)
    }

    /// Ensure the first and last vertices are recorded as intersections.
    pub fn add_endpoints(&mut self) {
        self.intersections.add_endpoints(&self.pts);
    }

    /// Append the pieces between consecutive intersections to `out`.
    pub fn add_split_edges(&mut self, out: &mut Vec<Self>) {
        self.intersections.add_split_edges(&self.pts, &self.label, out);
    }

    /// The pieces between consecutive intersections.
    pub fn split(&mut self) -> Vec<Self> {
        let mut out = Vec::new();
        self.add_split_edges(&mut out);
        out
    }

    /// Bounding envelope of the vertices.
    pub fn envelope(&self) -> Envelope {
        self.pts.iter().fold(Envelope::null(), |mut env, p| {
            env.expand_to_include_point(p.x, p.y);
            env
        })
    }

    /// Whether the first and last vertices coincide.
    pub fn is_closed(&self) -> bool {
        match (self.pts.first(), self.pts.last()) {
            (Some(first), Some(last)) => self.pts.len() > 1 && first.equals_2d(last),
            _ => false,
        }
    }

    /// Whether this is an area edge that doubles back on itself (`a, b, a`).
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.pts.len() == 3 && self.pts[0].equals_2d(&self.pts[2])
    }

    /// Whether both edges have the same vertices in the same order.
    pub fn is_pointwise_equal(&self, other: &Self) -> bool {
        self.pts.len() == other.pts.len()
            && self.pts.iter().zip(&other.pts).all(|(a, b)| a.equals_2d(b))
    }

    /// Whether both edges have the same vertices, in the same or reverse order.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.is_pointwise_equal(other)
            || (self.pts.len() == other.pts.len()
                && self
                    .pts
                    .iter()
                    .zip(other.pts.iter().rev())
                    .all(|(a, b)| a.equals_2d(b)))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge {}:", self.label)?;
        for p in &self.pts {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}
