// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detect a ring lying inside another ring.

use alloc::vec::Vec;
use core::ptr;

use understory_strtree::{Envelope, StrTree};

use crate::algorithm::is_point_in_ring;
use crate::coordinate::Coordinate;
use crate::edge::Edge;
use crate::error::TopologyError;

/// Tests whether any ring of a set lies inside another ring of the set.
///
/// Rings are closed [`Edge`]s. Each edge's intersection list marks the points where
/// other rings touch it; those points are skipped when picking a vertex to classify,
/// since their location relative to the touching ring is ambiguous.
#[derive(Debug)]
pub struct NestedRingTester<'a> {
    rings: Vec<&'a Edge>,
    total_env: Envelope,
    nested_pt: Option<Coordinate>,
}

impl Default for NestedRingTester<'_> {
    fn default() -> Self {
        Self {
            rings: Vec::new(),
            total_env: Envelope::null(),
            nested_pt: None,
        }
    }
}

impl<'a> NestedRingTester<'a> {
    /// An empty tester.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ring to test.
    pub fn add(&mut self, ring: &'a Edge) {
        self.total_env.expand_to_include(&ring.envelope());
        self.rings.push(ring);
    }

    /// Union of the envelopes of all added rings.
    pub fn total_envelope(&self) -> Envelope {
        self.total_env
    }

    /// A vertex of the nested ring found by the last [`Self::is_non_nested`] call.
    pub fn nested_point(&self) -> Option<Coordinate> {
        self.nested_pt
    }

    /// Whether no ring lies inside another.
    ///
    /// Stops at the first nested ring found and records one of its vertices, which
    /// [`Self::nested_point`] then returns.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoNonNodePoint`] if every vertex of a ring is a node of
    /// a ring it overlaps, so that nesting cannot be decided.
    pub fn is_non_nested(&mut self) -> Result<bool, TopologyError> {
        self.nested_pt = None;
        let envelopes: Vec<Envelope> = self.rings.iter().map(|r| r.envelope()).collect();
        let mut index: StrTree<usize> = StrTree::new();
        for (i, env) in envelopes.iter().enumerate() {
            index.insert(*env, i)?;
        }

        for (i, inner) in self.rings.iter().enumerate() {
            let inner_env = &envelopes[i];
            for &j in index.query(inner_env) {
                let search = self.rings[j];
                if i == j || ptr::eq(*inner, search) || !inner_env.intersects(&envelopes[j]) {
                    continue;
                }
                let pt = find_point_not_node(inner.coordinates(), search).ok_or(
                    TopologyError::NoNonNodePoint {
                        ring_index: i,
                        other_index: j,
                    },
                )?;
                if is_point_in_ring(pt, search.coordinates()) {
                    tracing::debug!(inner = i, outer = j, x = pt.x, y = pt.y, "nested ring found");
                    self.nested_pt = Some(pt);
                    return Ok(false);
                }
            }
        }
        tracing::debug!(rings = self.rings.len(), "no nested rings");
        Ok(true)
    }
}

/// First vertex of `pts` that is not an intersection recorded on `search`.
fn find_point_not_node(pts: &[Coordinate], search: &Edge) -> Option<Coordinate> {
    let nodes = search.intersections();
    pts.iter().copied().find(|pt| !nodes.is_intersection(pt))
}
