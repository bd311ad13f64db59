//! Benchmarks for palette ranking
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shadematch::{delta_e2000, rgb_to_lab, Matcher, MatcherOptions, Palette, PaletteEntry, RgbColor};

/// Deterministic spread of colours across the RGB cube
fn generate_palette(size: usize) -> Palette {
    let entries = (0..size)
        .map(|i| {
            let v = (i as u32).wrapping_mul(2_654_435_761);
            let color = RgbColor::new(v as u8, (v >> 8) as u8, (v >> 16) as u8);
            PaletteEntry::new(i.to_string(), color.to_hex(), color)
        })
        .collect();
    Palette::from_entries(entries).expect("non-empty palette")
}

fn bench_delta_e(c: &mut Criterion) {
    let a = rgb_to_lab(RgbColor::new(255, 102, 0));
    let b = rgb_to_lab(RgbColor::new(30, 144, 255));
    c.bench_function("delta_e2000", |bench| {
        bench.iter(|| delta_e2000(black_box(a), black_box(b)))
    });
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let query = RgbColor::new(120, 60, 200);

    for size in [16usize, 128, 1024, 8192].iter() {
        let palette = generate_palette(*size);
        group.throughput(Throughput::Elements(*size as u64));

        let sequential = Matcher::new(MatcherOptions { parallel_threshold: usize::MAX });
        group.bench_with_input(BenchmarkId::new("sequential", size), &palette, |b, p| {
            b.iter(|| sequential.rank(black_box(query), p, 5))
        });

        let parallel = Matcher::new(MatcherOptions { parallel_threshold: 0 });
        group.bench_with_input(BenchmarkId::new("parallel", size), &palette, |b, p| {
            b.iter(|| parallel.rank(black_box(query), p, 5))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_delta_e, bench_rank);
criterion_main!(benches);
