//! Benchmarks for Spantree Topology
//!
//! Measures performance of:
//! - Graph generation
//! - BFS distances and diameter
//! - Spanning-tree verification

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spantree_core::SwitchId;
use spantree_topology::{check_spanning_tree, generate, ActiveLinks};

/// Benchmark grid generation at different sizes
fn bench_generate_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_grid");

    for &side in &[4u32, 16, 64] {
        group.throughput(Throughput::Elements(u64::from(side * side)));
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter(|| generate::grid(black_box(side), black_box(side)))
        });
    }
    group.finish();
}

/// Benchmark diameter (all-pairs BFS)
fn bench_diameter(c: &mut Criterion) {
    let mut group = c.benchmark_group("diameter");

    for &side in &[4u32, 8, 16] {
        let topology = generate::grid(side, side);
        group.bench_with_input(BenchmarkId::new("grid", side), &topology, |b, t| {
            b.iter(|| black_box(t).diameter())
        });
    }
    group.finish();
}

/// Benchmark tree verification on a path's own edges
fn bench_check_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_spanning_tree");

    for &n in &[16u32, 256, 4096] {
        let topology = generate::path(n);
        let active: ActiveLinks = topology
            .switch_ids()
            .map(|s| {
                let links: BTreeSet<SwitchId> = topology.neighbors(s).unwrap().clone();
                (s, links)
            })
            .collect();

        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| check_spanning_tree(black_box(&topology), black_box(&active)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_grid, bench_diameter, bench_check_tree);
criterion_main!(benches);
