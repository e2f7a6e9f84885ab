// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bounds abstraction shared by every packed tree.

use core::fmt::Debug;

/// Bounds that a packed tree can store, union, and test for overlap.
///
/// Implemented by [`Envelope`](crate::Envelope) (2D) and [`Interval`](crate::Interval) (1D).
/// Every implementation has a distinguished *null* value: the bounds of nothing.
/// Null bounds never intersect anything, and are the identity for [`Bounds::union`].
///
/// Equality identifies the stored bounds of an item when it is removed.
pub trait Bounds: Copy + Debug + PartialEq {
    /// The null (empty) bounds.
    fn null() -> Self;

    /// Whether these are the null bounds.
    fn is_null(&self) -> bool;

    /// Smallest bounds covering both `self` and `other`.
    fn union(&self, other: &Self) -> Self;

    /// Whether the two bounds overlap (touching counts). Always false if either is null.
    fn intersects(&self, other: &Self) -> bool;
}
