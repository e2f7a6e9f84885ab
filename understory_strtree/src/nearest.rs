// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branch-and-bound nearest-neighbour search over [`BoundablePair`]s.
//!
//! Every search seeds a [`PairQueue`] with one pair of roots and repeatedly pops the
//! closest pair. Item pairs tighten the bound; node pairs are expanded into child
//! pairs, keeping only those strictly closer than the bound. The search ends when the
//! closest queued pair is no better than the bound.
//!
//! Item metrics must never return less than the envelope distance of the two items,
//! otherwise node distances stop being lower bounds and results may be wrong.
//! [`envelope_distance`] and [`centre_distance`] both satisfy this.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::envelope::Envelope;
use crate::math::hypot;
use crate::node::{Boundable, ItemBoundable};
use crate::packed::{PackStrategy, PackedTree};
use crate::pair::{BoundablePair, PairQueue};

/// The closest pair of items found by a search.
#[derive(Debug)]
pub struct NearestPair<'a, T> {
    /// Item from the first side.
    pub first: &'a T,
    /// Item from the second side.
    pub second: &'a T,
    /// Their distance under the search metric.
    pub distance: f64,
}

impl<T> Clone for NearestPair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NearestPair<'_, T> {}

/// Minimum distance between the items' envelopes.
pub fn envelope_distance<T>(
    a: &ItemBoundable<'_, Envelope, T>,
    b: &ItemBoundable<'_, Envelope, T>,
) -> f64 {
    a.bounds.distance(&b.bounds)
}

/// Euclidean distance between the centres of the items' envelopes.
pub fn centre_distance<T>(
    a: &ItemBoundable<'_, Envelope, T>,
    b: &ItemBoundable<'_, Envelope, T>,
) -> f64 {
    hypot(
        a.bounds.centre_x() - b.bounds.centre_x(),
        a.bounds.centre_y() - b.bounds.centre_y(),
    )
}

impl<T, S: PackStrategy<Envelope>> PackedTree<Envelope, T, S> {
    /// The two closest distinct items of this tree.
    ///
    /// An item is never paired with itself; equal items stored twice still pair up.
    /// Returns `None` when the tree holds fewer than two items.
    pub fn nearest_neighbour<F>(&self, item_distance: F) -> Option<NearestPair<'_, T>>
    where
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        let root = self.root_boundable();
        let init = BoundablePair::new(root, root, &item_distance);
        closest_pair(init, &item_distance, true)
    }

    /// The item of this tree closest to an external `item` with the given bounds.
    ///
    /// `first` of the result is the tree's item, `second` is `item`.
    pub fn nearest_neighbour_item<'a, F>(
        &'a self,
        bounds: Envelope,
        item: &'a T,
        item_distance: F,
    ) -> Option<NearestPair<'a, T>>
    where
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        let query = Boundable::Item(ItemBoundable::new(bounds, item));
        let init = BoundablePair::new(self.root_boundable(), query, &item_distance);
        closest_pair(init, &item_distance, false)
    }

    /// The closest pair with one item from this tree and one from `other`.
    pub fn nearest_neighbour_tree<'a, S2, F>(
        &'a self,
        other: &'a PackedTree<Envelope, T, S2>,
        item_distance: F,
    ) -> Option<NearestPair<'a, T>>
    where
        S2: PackStrategy<Envelope>,
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        let init = BoundablePair::new(
            self.root_boundable(),
            other.root_boundable(),
            &item_distance,
        );
        closest_pair(init, &item_distance, false)
    }

    /// Up to `k` items of this tree closest to an external item, nearest first.
    pub fn nearest_neighbours_item<'a, F>(
        &'a self,
        bounds: Envelope,
        item: &'a T,
        item_distance: F,
        k: usize,
    ) -> Vec<(&'a T, f64)>
    where
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        if k == 0 {
            return Vec::new();
        }
        let query = Boundable::Item(ItemBoundable::new(bounds, item));
        let mut queue = PairQueue::new();
        queue.push(BoundablePair::new(self.root_boundable(), query, &item_distance));

        // Max-heap of the best k so far; its top is the current bound.
        let mut best: BinaryHeap<Candidate<'a, T>> = BinaryHeap::with_capacity(k + 1);
        let mut bound = f64::INFINITY;
        let mut seq = 0_u64;
        while let Some(pair) = queue.pop() {
            if pair.distance() >= bound {
                break;
            }
            if let Some((found, _)) = pair.items() {
                best.push(Candidate {
                    distance: pair.distance(),
                    seq,
                    item: found.item,
                });
                seq += 1;
                if best.len() > k {
                    best.pop();
                }
                if best.len() == k
                    && let Some(top) = best.peek()
                {
                    bound = top.distance;
                }
            } else {
                pair.expand(bound, &item_distance, |p| queue.push(p));
            }
        }
        best.into_sorted_vec()
            .into_iter()
            .map(|c| (c.item, c.distance))
            .collect()
    }

    /// Whether some item of this tree lies within `max_distance` of some item of `other`.
    ///
    /// Always false when either tree is empty, whatever `max_distance` is.
    ///
    /// Pairs whose envelopes lie entirely within `max_distance` of each other are
    /// accepted without descending, so the item metric must not exceed
    /// [`Envelope::max_distance`] of the two items' envelopes.
    pub fn is_within_distance<S2, F>(
        &self,
        other: &PackedTree<Envelope, T, S2>,
        item_distance: F,
        max_distance: f64,
    ) -> bool
    where
        S2: PackStrategy<Envelope>,
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let mut queue = PairQueue::new();
        queue.push(BoundablePair::new(
            self.root_boundable(),
            other.root_boundable(),
            &item_distance,
        ));
        let mut upper_bound = f64::INFINITY;
        while let Some(pair) = queue.pop() {
            if pair.distance() > max_distance {
                return false;
            }
            if pair.max_distance() <= max_distance {
                return true;
            }
            if pair.is_leaves() {
                upper_bound = pair.distance();
                if upper_bound <= max_distance {
                    return true;
                }
            } else {
                pair.expand(upper_bound, &item_distance, |p| queue.push(p));
            }
        }
        false
    }
}

fn closest_pair<'a, T, F>(
    init: BoundablePair<'a, T>,
    item_distance: &F,
    exclude_self: bool,
) -> Option<NearestPair<'a, T>>
where
    F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
{
    let mut queue = PairQueue::new();
    queue.push(init);
    let mut bound = f64::INFINITY;
    let mut best = None;
    let mut popped = 0_usize;
    while bound > 0.0
        && let Some(pair) = queue.pop()
    {
        popped += 1;
        if pair.distance() >= bound {
            break;
        }
        if let Some((a, b)) = pair.items() {
            if exclude_self && a.slot().is_some() && a.slot() == b.slot() {
                continue;
            }
            bound = pair.distance();
            best = Some(NearestPair {
                first: a.item,
                second: b.item,
                distance: bound,
            });
        } else {
            pair.expand(bound, item_distance, |p| queue.push(p));
        }
    }
    tracing::trace!(popped, found = best.is_some(), "nearest neighbour search");
    best
}

struct Candidate<'a, T> {
    distance: f64,
    seq: u64,
    item: &'a T,
}

impl<T> PartialEq for Candidate<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Candidate<'_, T> {}

impl<T> PartialOrd for Candidate<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Candidate<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrTree;
    use alloc::vec;

    fn abc_tree() -> StrTree<char> {
        let mut tree = StrTree::with_node_capacity(2).unwrap();
        tree.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), 'A').unwrap();
        tree.insert(Envelope::new(5.0, 5.0, 6.0, 6.0), 'B').unwrap();
        tree.insert(Envelope::new(10.0, 10.0, 11.0, 11.0), 'C').unwrap();
        tree
    }

    fn point_tree(points: &[(f64, f64)], cap: usize) -> StrTree<usize> {
        let mut tree = StrTree::with_node_capacity(cap).unwrap();
        for (i, &(x, y)) in points.iter().enumerate() {
            tree.insert(Envelope::from_point(x, y), i).unwrap();
        }
        tree
    }

    fn scatter(n: usize, salt: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let x = ((i * 7919 + salt) % 1013) as f64 * 0.37;
                let y = ((i * 104_729 + salt * 31) % 997) as f64 * 0.41;
                (x, y)
            })
            .collect()
    }

    fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
        hypot(a.0 - b.0, a.1 - b.1)
    }

    #[test]
    fn self_nearest_on_three_boxes() {
        let tree = abc_tree();
        let found = tree.nearest_neighbour(centre_distance).unwrap();
        let mut pair = [*found.first, *found.second];
        pair.sort_unstable();
        assert_eq!(pair, ['A', 'B']);
        assert!((found.distance - 5.0 * 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_and_single_item_trees_have_no_pair() {
        let empty: StrTree<char> = StrTree::new();
        assert!(empty.nearest_neighbour(envelope_distance).is_none());
        assert!(
            empty
                .nearest_neighbour_item(Envelope::from_point(0.0, 0.0), &'x', envelope_distance)
                .is_none()
        );

        let mut single: StrTree<char> = StrTree::new();
        single.insert(Envelope::from_point(1.0, 1.0), 'a').unwrap();
        assert!(single.nearest_neighbour(envelope_distance).is_none());
        assert!(single.nearest_neighbour_tree(&empty, envelope_distance).is_none());
    }

    #[test]
    fn coincident_duplicates_pair_at_zero() {
        let mut tree: StrTree<char> = StrTree::new();
        tree.insert(Envelope::from_point(3.0, 3.0), 'p').unwrap();
        tree.insert(Envelope::from_point(3.0, 3.0), 'q').unwrap();
        tree.insert(Envelope::from_point(9.0, 9.0), 'r').unwrap();
        let found = tree.nearest_neighbour(centre_distance).unwrap();
        assert_eq!(found.distance, 0.0);
        assert_ne!(found.first, found.second);
    }

    #[test]
    fn self_nearest_matches_exhaustive_scan() {
        for (n, cap) in [(2, 2), (17, 3), (150, 4), (400, 10)] {
            let points = scatter(n, n);
            let tree = point_tree(&points, cap);
            let found = tree.nearest_neighbour(centre_distance).unwrap();
            let mut expected = f64::INFINITY;
            for i in 0..n {
                for j in (i + 1)..n {
                    expected = expected.min(dist(points[i], points[j]));
                }
            }
            assert_eq!(found.distance, expected, "n={n}");
            assert_eq!(dist(points[*found.first], points[*found.second]), expected);
        }
    }

    #[test]
    fn item_nearest_matches_exhaustive_scan() {
        let points = scatter(300, 5);
        let tree = point_tree(&points, 6);
        for (qx, qy) in [(0.0, 0.0), (200.0, 150.0), (-50.0, 500.0), (123.4, 56.7)] {
            let query = usize::MAX;
            let found = tree
                .nearest_neighbour_item(Envelope::from_point(qx, qy), &query, centre_distance)
                .unwrap();
            let expected = points
                .iter()
                .map(|&p| dist(p, (qx, qy)))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(found.distance, expected);
            assert_eq!(*found.second, usize::MAX);
        }
    }

    #[test]
    fn tree_to_tree_nearest_matches_exhaustive_scan() {
        let left = scatter(120, 1);
        let right: Vec<(f64, f64)> = scatter(80, 2).iter().map(|&(x, y)| (x + 500.0, y)).collect();
        let a = point_tree(&left, 5);
        let b = point_tree(&right, 3);
        let found = a.nearest_neighbour_tree(&b, centre_distance).unwrap();
        let mut expected = f64::INFINITY;
        for &p in &left {
            for &q in &right {
                expected = expected.min(dist(p, q));
            }
        }
        assert_eq!(found.distance, expected);
        assert_eq!(dist(left[*found.first], right[*found.second]), expected);
    }

    #[test]
    fn k_nearest_are_sorted_and_exact() {
        let points = scatter(250, 9);
        let tree = point_tree(&points, 8);
        let (qx, qy) = (180.0, 200.0);
        let found = tree.nearest_neighbours_item(
            Envelope::from_point(qx, qy),
            &usize::MAX,
            centre_distance,
            7,
        );
        let mut expected: Vec<f64> = points.iter().map(|&p| dist(p, (qx, qy))).collect();
        expected.sort_by(f64::total_cmp);
        let got: Vec<f64> = found.iter().map(|&(_, d)| d).collect();
        assert_eq!(got, &expected[..7]);
        for &(i, d) in &found {
            assert_eq!(dist(points[*i], (qx, qy)), d);
        }

        assert!(
            tree.nearest_neighbours_item(Envelope::from_point(0.0, 0.0), &0, centre_distance, 0)
                .is_empty()
        );
        let all =
            tree.nearest_neighbours_item(Envelope::from_point(0.0, 0.0), &0, centre_distance, 1000);
        assert_eq!(all.len(), 250);
    }

    #[test]
    fn within_distance() {
        let a = point_tree(&[(0.0, 0.0), (1.0, 0.0)], 2);
        let b = point_tree(&[(4.0, 0.0), (10.0, 0.0)], 2);
        assert!(a.is_within_distance(&b, envelope_distance, 3.0));
        assert!(a.is_within_distance(&b, envelope_distance, 3.5));
        assert!(!a.is_within_distance(&b, envelope_distance, 2.9));
        let empty: StrTree<usize> = StrTree::new();
        assert!(!a.is_within_distance(&empty, envelope_distance, 1e9));
        assert!(!a.is_within_distance(&empty, envelope_distance, f64::INFINITY));
        assert!(!empty.is_within_distance(&a, envelope_distance, f64::INFINITY));
        assert!(a.is_within_distance(&b, envelope_distance, f64::INFINITY));
        let far = vec![(100.0, 100.0)];
        assert!(!a.is_within_distance(&point_tree(&far, 2), centre_distance, 10.0));
    }
}
