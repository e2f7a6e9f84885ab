// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort-Tile-Recursive packing for 2D envelopes.

use alloc::vec::Vec;

use crate::envelope::Envelope;
use crate::math::cmp_f64;
use crate::packed::{PackStrategy, PackedTree, pack_runs};

/// Sort-Tile-Recursive grouping.
///
/// Each level is sorted by X centre and cut into `ceil(sqrt(P))` vertical slices,
/// where `P` is the number of parents the level needs. Each slice is then sorted by
/// Y centre and cut into runs of the node capacity.
#[derive(Copy, Clone, Debug, Default)]
pub struct StrPacking;

impl PackStrategy<Envelope> for StrPacking {
    fn group<C: Copy>(
        &self,
        mut children: Vec<(Envelope, C)>,
        node_capacity: usize,
    ) -> Vec<Vec<C>> {
        let n = children.len();
        let parent_count = n.div_ceil(node_capacity);
        let mut slice_count = 1_usize;
        while slice_count * slice_count < parent_count {
            slice_count += 1;
        }
        children.sort_by(|a, b| cmp_f64(a.0.centre_x(), b.0.centre_x()));
        let slice_capacity = n.div_ceil(slice_count).max(1);

        let mut runs = Vec::with_capacity(parent_count);
        for slice in children.chunks_mut(slice_capacity) {
            slice.sort_by(|a, b| cmp_f64(a.0.centre_y(), b.0.centre_y()));
            runs.extend(pack_runs(slice, node_capacity));
        }
        runs
    }
}

/// A packed R-tree over 2D envelopes, bulk loaded with [`StrPacking`].
pub type StrTree<T> = PackedTree<Envelope, T, StrPacking>;
