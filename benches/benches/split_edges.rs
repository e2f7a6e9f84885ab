// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_topology::{Coordinate, Edge, Label, NestedRingTester};

fn zigzag(vertices: usize) -> Vec<Coordinate> {
    (0..vertices)
        .map(|i| Coordinate::new(i as f64 * 10.0, if i % 2 == 0 { 0.0 } else { 10.0 }))
        .collect()
}

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

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_edges");
    for &vertices in &[16usize, 256, 4096] {
        let pts = zigzag(vertices);
        group.throughput(Throughput::Elements(vertices as u64));
        group.bench_function(format!("three_cuts_per_segment_{vertices}"), |b| {
            b.iter_batched(
                || Edge::new(pts.clone(), Label::default()),
                |mut edge| {
                    for seg in 0..vertices - 1 {
                        for t in [0.25, 0.5, 0.75] {
                            let (a, b) = (pts[seg], pts[seg + 1]);
                            let p = Coordinate::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                            edge.add_intersection(p, seg, t);
                        }
                    }
                    black_box(edge.split().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_nested_rings(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_rings");
    for &side in &[8usize, 32] {
        let rings: Vec<Edge> = (0..side * side)
            .map(|i| square((i % side) as f64 * 20.0, (i / side) as f64 * 20.0, 15.0))
            .collect();
        group.throughput(Throughput::Elements(rings.len() as u64));
        group.bench_function(format!("disjoint_grid_{side}x{side}"), |b| {
            b.iter(|| {
                let mut tester = NestedRingTester::new();
                for ring in &rings {
                    tester.add(ring);
                }
                black_box(tester.is_non_nested().unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_split, bench_nested_rings);
criterion_main!(benches);
