//! Criterion benchmarks for Huebox critical paths
//!
//! - Palette: lock-aware regeneration
//! - Share: `colors` parameter encode/decode and link parsing
//! - Store: duplicate detection and saved-list parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huebox::palette::{generate_with, LockMask, Palette};
use huebox::share::{colors_param, decode, encode};
use huebox::store::{is_duplicate, parse_saved, serialize_saved};
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Test Data Generators
// =============================================================================

fn make_saved(n: usize) -> Vec<Palette> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n).map(|_| Palette::random_with(&mut rng)).collect()
}

// =============================================================================
// Palette Benchmarks
// =============================================================================

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");
    let mut rng = StdRng::seed_from_u64(7);
    let previous = Palette::random_with(&mut rng);

    for locked in [0usize, 2, 5] {
        let indices: Vec<usize> = (0..locked).collect();
        let mask = LockMask::with_locked(&indices).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("generate", locked), &mask, |b, mask| {
            b.iter(|| generate_with(&mut rng, black_box(mask), black_box(&previous)))
        });
    }

    group.finish();
}

// =============================================================================
// Share Benchmarks
// =============================================================================

fn bench_share(c: &mut Criterion) {
    let mut group = c.benchmark_group("share");
    let palette = make_saved(1).remove(0);
    let param = encode(&palette);
    let link = format!("https://example.com/?theme=dark&colors={}#top", param.replace(',', "%2C"));

    group.bench_function("encode", |b| b.iter(|| encode(black_box(&palette))));
    group.bench_function("decode", |b| b.iter(|| decode(black_box(Some(param.as_str())))));
    group.bench_function("colors_param", |b| b.iter(|| colors_param(black_box(&link))));

    group.finish();
}

// =============================================================================
// Store Benchmarks
// =============================================================================

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for size in [10usize, 100, 1000] {
        let saved = make_saved(size);
        let missing = Palette::random_with(&mut StdRng::seed_from_u64(u64::MAX));
        let json = serialize_saved(&saved).unwrap_or_default();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("is_duplicate_miss", size), &saved, |b, saved| {
            b.iter(|| is_duplicate(black_box(&missing), black_box(saved)))
        });
        group.bench_with_input(BenchmarkId::new("parse_saved", size), &json, |b, json| {
            b.iter(|| parse_saved(black_box(json)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_share, bench_store);
criterion_main!(benches);
