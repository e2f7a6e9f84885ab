// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_strtree::{Envelope, StrTree, centre_distance};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_envelopes(n: usize, cell: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Envelope::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Envelope]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|e| Rectangle::from_corners([e.min_x, e.min_y], [e.max_x, e.max_y]))
        .collect()
}

fn bench_bulk_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree_rstar_build_query");
    for &n in &[64usize, 128] {
        let envelopes = gen_grid_envelopes(n, 10.0);
        let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_strtree_n{n}"), |b| {
            b.iter_batched(
                || envelopes.clone(),
                |envelopes| {
                    let mut tree: StrTree<u32> = StrTree::new();
                    for (i, e) in envelopes.into_iter().enumerate() {
                        tree.insert(e, i as u32).unwrap();
                    }
                    black_box(tree.query(&query).len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&envelopes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_nearest_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree_rstar_nearest");
    let n = 128_usize;
    let points: Vec<[f64; 2]> = (0..n * n)
        .map(|i| [(i % n) as f64 * 7.5, (i / n) as f64 * 7.5])
        .collect();
    let probes: Vec<[f64; 2]> = (0..64)
        .map(|i| [i as f64 * 13.3, 500.0 - i as f64 * 4.1])
        .collect();

    let mut ours: StrTree<u32> = StrTree::new();
    for (i, p) in points.iter().enumerate() {
        ours.insert(Envelope::from_point(p[0], p[1]), i as u32).unwrap();
    }
    ours.build();
    let theirs = RTree::bulk_load(points);

    group.bench_function("understory_strtree", |b| {
        b.iter(|| {
            for p in &probes {
                let env = Envelope::from_point(p[0], p[1]);
                black_box(ours.nearest_neighbour_item(env, &u32::MAX, centre_distance));
            }
        });
    });
    group.bench_function("rstar", |b| {
        b.iter(|| {
            for p in &probes {
                black_box(theirs.nearest_neighbor(p));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_bulk_build_query, bench_nearest_item);
criterion_main!(benches);
