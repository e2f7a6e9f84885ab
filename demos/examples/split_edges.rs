// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge splitting.
//!
//! Record intersections on a polyline (one of them landing exactly on a vertex),
//! dump the ordered intersection list, and split the edge into labelled pieces.
//!
//! Run:
//! - `cargo run -p understory_demos --example split_edges`

use kurbo::Point;
use understory_topology::{Coordinate, Edge, Label, Location};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let pts: Vec<Coordinate> = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]
        .into_iter()
        .map(|(x, y)| Point::new(x, y).into())
        .collect();
    let mut edge = Edge::new(pts, Label::line(0, Location::Interior));

    edge.add_intersection_on_segment(Coordinate::new(4.0, 0.0), 0);
    edge.add_intersection_on_segment(Coordinate::new(10.0, 6.0), 1);
    // Lands on vertex 2 and is stored as the start of segment 2.
    edge.add_intersection(Coordinate::new(10.0, 10.0), 1, 1.0);
    // Same position as the first one: ignored.
    edge.add_intersection_on_segment(Coordinate::new(4.0, 0.0), 0);

    println!("{edge}");
    print!("{}", edge.intersections());

    let pieces = edge.split();
    println!("{} pieces:", pieces.len());
    for piece in &pieces {
        println!("  {piece}");
    }
    assert_eq!(pieces.len(), edge.intersections().len() - 1);
}
