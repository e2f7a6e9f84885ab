// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairs of boundables and the distance-ordered queue that drives nearest-neighbour search.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::envelope::Envelope;
use crate::node::{Boundable, ItemBoundable};

/// Two boundables, one from each side of a search, with their distance.
///
/// For two items the distance is the caller's item metric. Otherwise it is the
/// minimum distance between the two envelopes, which never exceeds the distance of
/// any item pair nested below them.
pub struct BoundablePair<'a, T> {
    first: Boundable<'a, Envelope, T>,
    second: Boundable<'a, Envelope, T>,
    distance: f64,
}

impl<'a, T> BoundablePair<'a, T> {
    /// Pair two boundables, computing their distance once.
    pub fn new<F>(
        first: Boundable<'a, Envelope, T>,
        second: Boundable<'a, Envelope, T>,
        item_distance: &F,
    ) -> Self
    where
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        let distance = match (&first, &second) {
            (Boundable::Item(a), Boundable::Item(b)) => item_distance(a, b),
            _ => first.bounds().distance(&second.bounds()),
        };
        Self {
            first,
            second,
            distance,
        }
    }

    /// First member.
    pub fn first(&self) -> Boundable<'a, Envelope, T> {
        self.first
    }

    /// Second member.
    pub fn second(&self) -> Boundable<'a, Envelope, T> {
        self.second
    }

    /// Memoized distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Upper bound on the distance of any item pair nested in this pair.
    pub fn max_distance(&self) -> f64 {
        self.first.bounds().max_distance(&self.second.bounds())
    }

    /// Whether both members are items.
    pub fn is_leaves(&self) -> bool {
        self.first.is_item() && self.second.is_item()
    }

    /// Both members as items, if this pair is a leaf pair.
    pub fn items(
        &self,
    ) -> Option<(ItemBoundable<'a, Envelope, T>, ItemBoundable<'a, Envelope, T>)> {
        match (self.first, self.second) {
            (Boundable::Item(a), Boundable::Item(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Whether the first member is the one to expand.
    ///
    /// A node is always expanded before an item. Between two nodes the one with the
    /// larger area goes first; equal areas expand the second member.
    fn expand_first(&self) -> bool {
        match (&self.first, &self.second) {
            (Boundable::Node(a), Boundable::Node(b)) => a.bounds().area() > b.bounds().area(),
            (Boundable::Node(_), Boundable::Item(_)) => true,
            _ => false,
        }
    }

    /// Replace the composite member with each of its children and hand every
    /// resulting pair closer than `bound` to `sink`.
    ///
    /// Does nothing for a leaf pair.
    pub fn expand<F>(&self, bound: f64, item_distance: &F, mut sink: impl FnMut(Self))
    where
        F: Fn(&ItemBoundable<'_, Envelope, T>, &ItemBoundable<'_, Envelope, T>) -> f64,
    {
        if self.expand_first() {
            if let Boundable::Node(node) = self.first {
                for child in node.children() {
                    let pair = Self::new(child, self.second, item_distance);
                    if pair.distance < bound {
                        sink(pair);
                    }
                }
            }
        } else if let Boundable::Node(node) = self.second {
            for child in node.children() {
                let pair = Self::new(self.first, child, item_distance);
                if pair.distance < bound {
                    sink(pair);
                }
            }
        }
    }
}

impl<T> Clone for BoundablePair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BoundablePair<'_, T> {}

impl<T: Debug> Debug for BoundablePair<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundablePair")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("distance", &self.distance)
            .finish()
    }
}

struct Queued<'a, T> {
    pair: BoundablePair<'a, T>,
    seq: u64,
}

impl<T> PartialEq for Queued<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Queued<'_, T> {}

impl<T> PartialOrd for Queued<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Queued<'_, T> {
    // Reversed so the max-heap pops the closest pair, oldest first among equals.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .pair
            .distance
            .total_cmp(&self.pair.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of [`BoundablePair`]s keyed by distance.
///
/// Pairs at equal distance pop in the order they were pushed, which keeps search
/// results reproducible.
pub struct PairQueue<'a, T> {
    heap: BinaryHeap<Queued<'a, T>>,
    next_seq: u64,
}

impl<T> Default for PairQueue<'_, T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<'a, T> PairQueue<'a, T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair.
    pub fn push(&mut self, pair: BoundablePair<'a, T>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { pair, seq });
    }

    /// Remove and return the closest pair.
    pub fn pop(&mut self) -> Option<BoundablePair<'a, T>> {
        self.heap.pop().map(|q| q.pair)
    }

    /// The closest pair without removing it.
    pub fn peek(&self) -> Option<&BoundablePair<'a, T>> {
        self.heap.peek().map(|q| &q.pair)
    }

    /// Number of queued pairs.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Debug for PairQueue<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PairQueue")
            .field("len", &self.heap.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearest::envelope_distance;

    fn item(bounds: Envelope, v: &u32) -> Boundable<'_, Envelope, u32> {
        Boundable::Item(ItemBoundable::new(bounds, v))
    }

    #[test]
    fn leaf_pair_uses_item_metric() {
        let (a, b) = (1, 2);
        let pair = BoundablePair::new(
            item(Envelope::new(0.0, 0.0, 1.0, 1.0), &a),
            item(Envelope::new(4.0, 0.0, 5.0, 1.0), &b),
            &|_: &ItemBoundable<'_, Envelope, u32>, _: &ItemBoundable<'_, Envelope, u32>| 42.0,
        );
        assert!(pair.is_leaves());
        assert_eq!(pair.distance(), 42.0);
        let (x, y) = pair.items().unwrap();
        assert_eq!((*x.item, *y.item), (1, 2));
        assert!((pair.max_distance() - 26.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn queue_pops_nearest_then_oldest() {
        let vals = [0_u32, 1, 2, 3];
        let env = |x: f64| Envelope::new(x, 0.0, x, 0.0);
        let origin = item(env(0.0), &vals[0]);
        let mut queue = PairQueue::new();
        for (x, v) in [(3.0, &vals[1]), (1.0, &vals[2]), (3.0, &vals[3])] {
            queue.push(BoundablePair::new(origin, item(env(x), v), &envelope_distance));
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek().map(BoundablePair::distance), Some(1.0));
        let order: alloc::vec::Vec<u32> = core::iter::from_fn(|| queue.pop())
            .filter_map(|p| p.items().map(|(_, b)| *b.item))
            .collect();
        assert_eq!(order, [2, 1, 3]);
        assert!(queue.is_empty());
    }
}
