// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory STR tree: bulk-loaded packed R-trees with nearest-neighbour search.
//!
//! Items are staged with their bounds, then packed bottom-up in one pass the first
//! time the tree is queried. The result is a balanced, read-mostly tree:
//!
//! - Window queries returning a list ([`PackedTree::query`]) or driving a visitor
//!   ([`PackedTree::query_with`]).
//! - Removal of single items without rebalancing ([`PackedTree::remove`]).
//! - Branch-and-bound nearest-neighbour search over pairs of nodes: closest pair within
//!   one tree, closest item to an external item, closest pair between two trees, and
//!   the `k` closest items.
//!
//! [`StrTree`] packs 2D [`Envelope`]s with the Sort-Tile-Recursive algorithm. [`SirTree`]
//! packs 1D [`Interval`]s by midpoint. Other layouts plug in through [`PackStrategy`].
//!
//! # Example
//!
//! ```rust
//! use understory_strtree::{Envelope, StrTree, centre_distance};
//!
//! let mut tree: StrTree<&str> = StrTree::with_node_capacity(2).unwrap();
//! tree.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), "a").unwrap();
//! tree.insert(Envelope::new(5.0, 5.0, 6.0, 6.0), "b").unwrap();
//! tree.insert(Envelope::new(10.0, 10.0, 11.0, 11.0), "c").unwrap();
//!
//! // The first query builds the tree.
//! let mut hits = tree.query(&Envelope::new(0.0, 0.0, 6.0, 6.0));
//! hits.sort();
//! assert_eq!(hits, [&"a", &"b"]);
//!
//! // Closest two distinct items, by distance between envelope centres.
//! let pair = tree.nearest_neighbour(centre_distance).unwrap();
//! assert!((pair.distance - 50.0_f64.sqrt()).abs() < 1e-12);
//! ```
//!
//! ## Building and threads
//!
//! The built tree lives in a [`core::cell::OnceCell`], so queries take `&self` and
//! trees are not `Sync`. Share a tree across threads by building it first and moving
//! it, or by wrapping it in a lock.
//!
//! ## Features
//!
//! - `std` (default): float math from `std`.
//! - `libm`: float math from `libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for [`Envelope`], [`Interval`] and [`TreeConfig`].
//!
//! This crate assumes no NaNs in bounds.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod bounds;
mod config;
mod envelope;
mod error;
mod interval;
mod math;
mod nearest;
mod node;
mod packed;
mod pair;
mod sirtree;
mod strtree;

pub use bounds::Bounds;
pub use config::{DEFAULT_NODE_CAPACITY, TreeConfig};
pub use envelope::Envelope;
pub use error::TreeError;
pub use interval::Interval;
pub use nearest::{NearestPair, centre_distance, envelope_distance};
pub use node::{Boundable, ItemBoundable, NodeRef};
pub use packed::{PackStrategy, PackedTree, pack_runs};
pub use pair::{BoundablePair, PairQueue};
pub use sirtree::{SirPacking, SirTree};
pub use strtree::{StrPacking, StrTree};
