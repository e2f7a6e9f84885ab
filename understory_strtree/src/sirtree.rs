// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort-Interval-Recursive packing for one-dimensional intervals.

use alloc::vec::Vec;

use crate::error::TreeError;
use crate::interval::Interval;
use crate::math::cmp_f64;
use crate::packed::{PackStrategy, PackedTree, pack_runs};

/// Orders intervals by their midpoint and groups them in runs.
#[derive(Copy, Clone, Debug, Default)]
pub struct SirPacking;

impl PackStrategy<Interval> for SirPacking {
    fn group<C: Copy>(
        &self,
        mut children: Vec<(Interval, C)>,
        node_capacity: usize,
    ) -> Vec<Vec<C>> {
        children.sort_by(|a, b| cmp_f64(a.0.centre(), b.0.centre()));
        pack_runs(&children, node_capacity)
    }
}

/// A packed tree over 1D intervals.
pub type SirTree<T> = PackedTree<Interval, T, SirPacking>;

impl<T> PackedTree<Interval, T, SirPacking> {
    /// Stage an item covering `[a, b]` (ends in either order).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AlreadyBuilt`] once the tree has been built.
    pub fn insert_range(&mut self, a: f64, b: f64, item: T) -> Result<(), TreeError> {
        self.insert(Interval::new(a, b), item)
    }

    /// Items whose intervals overlap `[a, b]`.
    pub fn query_range(&self, a: f64, b: f64) -> Vec<&T> {
        self.query(&Interval::new(a, b))
    }

    /// Items whose intervals contain `x`.
    pub fn query_value(&self, x: f64) -> Vec<&T> {
        self.query(&Interval::new(x, x))
    }
}
