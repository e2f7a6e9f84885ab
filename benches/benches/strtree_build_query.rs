// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_strtree::{Envelope, StrTree, centre_distance, envelope_distance};

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

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_points(count: usize, extent: f64, seed: u64) -> Vec<Envelope> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Envelope::from_point(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn gen_clustered_envelopes(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let x0 = cx + (rng.next_f64() - 0.5) * spread;
            let y0 = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Envelope::new(x0, y0, x0 + 12.0, y0 + 12.0));
        }
    }
    out
}

fn build(envelopes: &[Envelope], node_capacity: usize) -> StrTree<u32> {
    let mut tree = StrTree::with_node_capacity(node_capacity).unwrap();
    for (i, e) in envelopes.iter().copied().enumerate() {
        tree.insert(e, i as u32).unwrap();
    }
    tree.build();
    tree
}

fn bench_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree_build_query");
    let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
    for &n in &[32usize, 64, 128] {
        let envelopes = gen_grid_envelopes(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        for &cap in &[4usize, 10, 16] {
            group.bench_function(format!("grid_n{n}_cap{cap}"), |b| {
                b.iter_batched(
                    || envelopes.clone(),
                    |envelopes| {
                        let tree = build(&envelopes, cap);
                        black_box(tree.query(&query).len());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    let clustered = gen_clustered_envelopes(32, 128, 200.0);
    group.bench_function("clustered_4096", |b| {
        b.iter_batched(
            || clustered.clone(),
            |envelopes| {
                let tree = build(&envelopes, 10);
                black_box(tree.query(&Envelope::new(800.0, 800.0, 1200.0, 1200.0)).len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_query_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree_query");
    let tree = build(&gen_grid_envelopes(128, 10.0), 10);
    for &size in &[10.0_f64, 100.0, 400.0] {
        let query = Envelope::new(300.0, 300.0, 300.0 + size, 300.0 + size);
        group.bench_function(format!("window_{size}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                tree.query_with(&query, |_| hits += 1);
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree_nearest");
    for &count in &[1_000usize, 10_000] {
        let points = gen_random_points(count, 10_000.0, 0xCAFE_F00D_DEAD_BEEF);
        let tree = build(&points, 10);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("self_pair_{count}"), |b| {
            b.iter(|| black_box(tree.nearest_neighbour(centre_distance).map(|p| p.distance)));
        });

        let probes = gen_random_points(64, 10_000.0, 0xFACE_FEED_CAFE_BABE);
        group.bench_function(format!("item_{count}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(tree.nearest_neighbour_item(*probe, &u32::MAX, envelope_distance));
                }
            });
        });
        group.bench_function(format!("k8_{count}"), |b| {
            b.iter(|| {
                black_box(tree.nearest_neighbours_item(probes[0], &u32::MAX, envelope_distance, 8))
            });
        });

        let other = build(&gen_random_points(count, 10_000.0, 0xBADC_F00D_1234_5678), 10);
        group.bench_function(format!("tree_pair_{count}"), |b| {
            b.iter(|| {
                black_box(tree.nearest_neighbour_tree(&other, centre_distance).map(|p| p.distance))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_query, bench_query_only, bench_nearest);
criterion_main!(benches);
