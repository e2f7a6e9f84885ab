// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring nesting.
//!
//! Check a set of disjoint rings, then add a hole-like ring inside one of them and
//! report the witness point.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example nested_rings`

use understory_topology::{Coordinate, Edge, Label, NestedRingTester};

fn square(x0: f64, y0: f64, size: f64) -> Edge {
    let (x1, y1) = (x0 + size, y0 + size);
    Edge::new(
        vec![
            Coordinate::new(x0, y0),
            Coordinate::new(x1, y0),
            Coordinate::new(x1, y1),
            Coordinate::new(x0, y1),
            Coordinate::new(x0, y0),
        ],
        Label::default(),
    )
}

fn main() -> Result<(), understory_topology::TopologyError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let rings: Vec<Edge> = (0..4).map(|i| square(f64::from(i) * 20.0, 0.0, 15.0)).collect();
    let inner = square(22.0, 2.0, 5.0);

    let mut tester = NestedRingTester::new();
    for ring in &rings {
        tester.add(ring);
    }
    let ok = tester.is_non_nested()?;
    println!("{} rings, non-nested: {ok}", rings.len());
    assert!(ok);

    tester.add(&inner);
    let ok = tester.is_non_nested()?;
    println!(
        "with inner ring, non-nested: {ok}, witness: {:?}",
        tester.nested_point().map(|p| p.to_string())
    );
    println!("total envelope: {:?}", tester.total_envelope());
    assert!(!ok);
    Ok(())
}
