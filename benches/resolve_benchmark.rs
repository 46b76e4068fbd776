//! Benchmarks for list resolution and container encoding.
//!
//! Run with: cargo bench
//!
//! This benchmark suite measures:
//! - Resolution of wide include fan-outs
//! - Resolution of deep include chains
//! - Encoding of resolved entries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geosite::{build_entry, FileIndex, GeoSiteWriter, Resolver};
use std::fs;
use tempfile::TempDir;

/// Create `leaves` lists of `rules_per_leaf` rules each, plus an `all` list
/// including every leaf.
fn fan_out(leaves: usize, rules_per_leaf: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut all = String::new();
    for leaf in 0..leaves {
        let mut content = String::new();
        for i in 0..rules_per_leaf {
            match i % 4 {
                0 => content.push_str(&format!("domain{}.leaf{}.com\n", i, leaf)),
                1 => content.push_str(&format!("full:www{}.leaf{}.com @ads\n", i, leaf)),
                2 => content.push_str(&format!("keyword:leaf{}k{}\n", leaf, i)),
                _ => content.push_str(&format!("10.{}.{}.0/24\n", leaf % 256, i % 256)),
            }
        }
        fs::write(dir.path().join(format!("leaf{}", leaf)), content).unwrap();
        all.push_str(&format!("include:leaf{}\n", leaf));
    }
    fs::write(dir.path().join("all"), all).unwrap();
    dir
}

/// Create a chain `l0 -> l1 -> ... -> l{depth-1}`.
fn chain(depth: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..depth {
        let content = if i + 1 < depth {
            format!("d{}.com\ninclude:l{}\n", i, i + 1)
        } else {
            format!("d{}.com\n", i)
        };
        fs::write(dir.path().join(format!("l{}", i)), content).unwrap();
    }
    dir
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_fan_out");

    for leaves in [10, 100, 500] {
        let dir = fan_out(leaves, 100);
        let index = FileIndex::build(dir.path()).unwrap();

        group.throughput(Throughput::Elements((leaves * 100) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &index, |b, index| {
            b.iter(|| {
                let mut resolver = Resolver::new(index);
                black_box(resolver.resolve("all").unwrap())
            })
        });
    }

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_chain");

    for depth in [10, 100, 500] {
        let dir = chain(depth);
        let index = FileIndex::build(dir.path()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &index, |b, index| {
            b.iter(|| {
                let mut resolver = Resolver::new(index);
                black_box(resolver.resolve("l0").unwrap())
            })
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let dir = fan_out(100, 100);
    let index = FileIndex::build(dir.path()).unwrap();
    let mut resolver = Resolver::new(&index);
    let entries: Vec<_> = index
        .names()
        .map(|name| build_entry(&resolver.resolve(name).unwrap()).unwrap())
        .collect();

    c.bench_function("encode_entries", |b| {
        let mut writer = GeoSiteWriter::new();
        b.iter(|| black_box(writer.write(&entries)))
    });
}

criterion_group!(benches, bench_fan_out, bench_chain, bench_encode);
criterion_main!(benches);
