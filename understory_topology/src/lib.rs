// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Topology: edge bookkeeping for planar graphs.
//!
//! - [`EdgeIntersectionList`]: the intersections found on an edge, deduplicated and
//!   ordered by `(segment_index, distance)`, and splitting the edge at them.
//! - [`Edge`]: a labelled polyline owning its intersection list.
//! - [`locate_point_in_ring`]: ray-crossing point-in-ring location.
//! - [`NestedRingTester`]: finds a ring nested inside another, using an
//!   [`understory_strtree::StrTree`] over ring envelopes to find candidate pairs.
//!
//! Coordinates convert to and from [`kurbo::Point`].
//!
//! # Example
//!
//! ```rust
//! use understory_topology::{Coordinate, Edge, Label, Location};
//!
//! let pts = vec![
//!     Coordinate::new(0.0, 0.0),
//!     Coordinate::new(10.0, 0.0),
//!     Coordinate::new(10.0, 10.0),
//! ];
//! let mut edge = Edge::new(pts, Label::line(0, Location::Interior));
//!
//! // Something crosses the first segment half way along.
//! edge.add_intersection(Coordinate::new(5.0, 0.0), 0, 0.5);
//!
//! let pieces = edge.split();
//! assert_eq!(pieces.len(), 2);
//! assert_eq!(pieces[0].coordinates(), [Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 0.0)]);
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float math backend, forwarded to Kurbo and the STR tree.
//! - `serde`: `Serialize`/`Deserialize` for [`Coordinate`], [`Location`],
//!   [`TopologyLocation`] and [`Label`].

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod algorithm;
mod coordinate;
mod edge;
mod edge_intersection;
mod edge_intersection_list;
mod error;
mod label;
mod nested_ring;

pub use algorithm::{Orientation, is_point_in_ring, locate_point_in_ring, orientation_index};
pub use coordinate::Coordinate;
pub use edge::Edge;
pub use edge_intersection::EdgeIntersection;
pub use edge_intersection_list::EdgeIntersectionList;
pub use error::TopologyError;
pub use label::{Label, Location, Position, TopologyLocation};
pub use nested_ring::NestedRingTester;
