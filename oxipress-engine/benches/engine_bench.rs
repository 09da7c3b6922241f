//! Engine overhead: compression with analysis, decompression with validation.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxipress_engine::{Algorithm, Engine};
use std::hint::black_box;

fn text_like(size: usize) -> Vec<u8> {
    let text = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
                 Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. ";
    text.iter().copied().cycle().take(size).collect()
}

fn bench_compress(c: &mut Criterion) {
    let engine = Engine::default();
    let data = text_like(32 * 1024);
    let mut group = c.benchmark_group("engine_compress");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for algorithm in Algorithm::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &data, |b, data| {
            b.iter(|| engine.compress(algorithm, "bench", black_box(data)));
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let engine = Engine::default();
    let data = text_like(32 * 1024);
    let mut group = c.benchmark_group("engine_decompress");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for algorithm in Algorithm::ALL {
        let Ok(compressed) = engine.compress(algorithm, "bench", &data) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm),
            &compressed.container,
            |b, container| {
                b.iter(|| engine.decompress(algorithm, "bench", black_box(container)));
            },
        );
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let engine = Engine::default();
    let data = text_like(64 * 1024);
    c.bench_function("engine_analyze", |b| {
        b.iter(|| engine.analyze(black_box(&data)));
    });
}

criterion_group!(benches, bench_compress, bench_decompress, bench_analyze);
criterion_main!(benches);
