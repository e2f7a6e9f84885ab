// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! STR tree basics.
//!
//! Stage a few boxes, run a window query, remove an item, and search for nearest
//! neighbours.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example strtree_basics`

use understory_strtree::{Envelope, StrTree, centre_distance, envelope_distance};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut tree: StrTree<&str> = StrTree::with_node_capacity(2).unwrap();
    tree.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), "A").unwrap();
    tree.insert(Envelope::new(5.0, 5.0, 6.0, 6.0), "B").unwrap();
    tree.insert(Envelope::new(10.0, 10.0, 11.0, 11.0), "C").unwrap();

    // The first query packs the tree.
    let window = Envelope::new(0.0, 0.0, 6.0, 6.0);
    let mut hits = tree.query(&window);
    hits.sort();
    println!("query {window:?}: {hits:?}");
    assert_eq!(hits, [&"A", &"B"]);
    println!("depth {}, {} items", tree.depth(), tree.len());

    let pair = tree.nearest_neighbour(centre_distance).unwrap();
    println!(
        "closest pair: {} and {} at {:.4}",
        pair.first, pair.second, pair.distance
    );

    let probe = Envelope::from_point(9.0, 9.0);
    let near = tree
        .nearest_neighbour_item(probe, &"probe", envelope_distance)
        .unwrap();
    println!("closest to (9, 9): {} at {:.4}", near.first, near.distance);
    assert_eq!(*near.first, "C");

    let k = tree.nearest_neighbours_item(probe, &"probe", envelope_distance, 2);
    println!("two closest to (9, 9): {k:?}");

    // Removal excises the item without rebalancing.
    assert!(tree.remove(&Envelope::new(5.0, 5.0, 6.0, 6.0), &"B"));
    let hits = tree.query(&window);
    println!("after removing B: {hits:?}");
    assert_eq!(hits, [&"A"]);

    let pair = tree.nearest_neighbour(centre_distance).unwrap();
    println!(
        "closest pair now: {} and {} at {:.4}",
        pair.first, pair.second, pair.distance
    );
}
