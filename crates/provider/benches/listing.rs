//! Performance benchmarks for the provider request paths.
//!
//! These benchmarks measure:
//! - URI routing
//! - Listing every entry across both config types
//! - Probing a single entry

use std::fs;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use provider::protocol::UriRouter;
use provider::{ConfigProvider, StaticPermissions, TypeResolver};
use tempfile::TempDir;

const AUTHORITY: &str = "io.github.acedroidx.frp.config";

/// Storage root with `per_type` entries in each config type directory.
fn populated_root(per_type: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for ty in ["frpc", "frps"] {
        let dir = temp_dir.path().join(ty);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..per_type {
            fs::write(dir.join(format!("{ty}-{i}.toml")), "serverPort = 7000\n").unwrap();
        }
    }
    temp_dir
}

/// Benchmark URI classification.
fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    let router = UriRouter::new(AUTHORITY);

    group.bench_function("root", |b| {
        let uri = router.root_uri();
        b.iter(|| router.route(black_box(&uri)).unwrap());
    });

    group.bench_function("item", |b| {
        let uri = router.item_uri("frpc", "my tunnel.toml");
        b.iter(|| router.route(black_box(&uri)).unwrap());
    });

    group.finish();
}

/// Benchmark full listings at a few directory sizes.
fn bench_list_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_all");

    for per_type in [10usize, 100, 1000] {
        let root = populated_root(per_type);
        let provider = ConfigProvider::new(
            TypeResolver::new(root.path()),
            AUTHORITY,
            StaticPermissions::new(true, false),
        );
        let uri = provider.router().root_uri();

        group.throughput(Throughput::Elements((per_type * 2) as u64));
        group.bench_function(format!("{}_entries", per_type * 2), |b| {
            b.iter(|| provider.query(black_box(&uri)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark single entry probes.
fn bench_describe_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe_one");
    let root = populated_root(100);
    let provider = ConfigProvider::new(
        TypeResolver::new(root.path()),
        AUTHORITY,
        StaticPermissions::new(true, false),
    );

    let hit = provider.router().item_uri("frps", "frps-42.toml");
    group.bench_function("hit", |b| {
        b.iter(|| provider.query(black_box(&hit)).unwrap());
    });

    let miss = provider.router().item_uri("frps", "absent.toml");
    group.bench_function("miss", |b| {
        b.iter(|| provider.query(black_box(&miss)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_routing, bench_list_all, bench_describe_one);
criterion_main!(benches);
