// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, deduplicated intersections along an edge, and splitting at them.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::coordinate::Coordinate;
use crate::edge::Edge;
use crate::edge_intersection::{EdgeIntersection, IntersectionKey};
use crate::label::Label;

/// The intersections of one edge, ordered by position along the edge.
///
/// Two intersections at the same `(segment_index, distance)` are the same entry; the
/// first coordinate added at a position is the one kept.
#[derive(Clone, Debug, Default)]
pub struct EdgeIntersectionList {
    entries: BTreeMap<IntersectionKey, EdgeIntersection>,
}

impl EdgeIntersectionList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an intersection unless one already exists at the same position.
    ///
    /// Returns the entry stored at that position, which is the earlier one if the
    /// position was already present.
    pub fn add(
        &mut self,
        coordinate: Coordinate,
        segment_index: usize,
        distance: f64,
    ) -> &EdgeIntersection {
        let candidate = EdgeIntersection::new(coordinate, segment_index, distance);
        self.entries.entry(candidate.key()).or_insert(candidate)
    }

    /// Add entries for the first and last vertices of `pts`.
    pub fn add_endpoints(&mut self, pts: &[Coordinate]) {
        if pts.is_empty() {
            return;
        }
        let last = pts.len() - 1;
        self.add(pts[0], 0, 0.0);
        self.add(pts[last], last, 0.0);
    }

    /// Whether some intersection lies at `pt` (planar equality).
    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.entries.values().any(|ei| ei.coordinate.equals_2d(pt))
    }

    /// Intersections in order along the edge.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.entries.values()
    }

    /// Number of distinct intersections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no intersections.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split the edge with vertices `pts` at every intersection, appending the pieces
    /// to `out`.
    ///
    /// The edge's endpoints are added first, so `k` distinct intersections including
    /// endpoints produce `k - 1` pieces, each labelled with a copy of `label`.
    ///
    /// # Panics
    ///
    /// Panics if an entry's segment index is not a vertex index of `pts`.
    pub fn add_split_edges(&mut self, pts: &[Coordinate], label: &Label, out: &mut Vec<Edge>) {
        self.add_endpoints(pts);
        let before = out.len();
        let mut it = self.entries.values();
        let Some(mut prev) = it.next() else {
            return;
        };
        for ei in it {
            out.push(Self::create_split_edge(pts, label, prev, ei));
            prev = ei;
        }
        tracing::trace!(pieces = out.len() - before, "split edge");
    }

    /// The piece of `pts` running from `ei0` to `ei1`.
    ///
    /// It starts at `ei0`'s coordinate, continues through every vertex after `ei0`'s
    /// segment start up to `ei1`'s segment start, and ends at `ei1`'s coordinate
    /// unless that coordinate is exactly the last vertex already included.
    ///
    /// # Panics
    ///
    /// Panics if `ei1`'s segment index is not a vertex index of `pts`, or if `ei1`
    /// comes before `ei0`.
    pub fn create_split_edge(
        pts: &[Coordinate],
        label: &Label,
        ei0: &EdgeIntersection,
        ei1: &EdgeIntersection,
    ) -> Edge {
        let last_seg_start = pts[ei1.segment_index];
        let use_pt1 = ei1.distance > 0.0 || !ei1.coordinate.equals_2d(&last_seg_start);
        let mut split = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        split.push(ei0.coordinate);
        split.extend_from_slice(&pts[ei0.segment_index + 1..=ei1.segment_index]);
        if use_pt1 {
            split.push(ei1.coordinate);
        }
        Edge::new(split, *label)
    }
}

impl fmt::Display for EdgeIntersectionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Intersections:")?;
        for ei in self.entries.values() {
            writeln!(f, "{ei}")?;
        }
        Ok(())
    }
}
