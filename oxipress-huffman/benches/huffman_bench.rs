//! Huffman compression/decompression throughput across data patterns.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxipress_huffman::{compress, decompress};
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    pub fn skewed(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0xDEADBEEF;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let r = (seed >> 40) % 100;
            data.push(match r {
                0..=59 => b'e',
                60..=84 => b't',
                85..=94 => b'a',
                _ => b'z',
            });
        }
        data
    }

    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. ";
        text.iter().copied().cycle().take(size).collect()
    }
}

fn bench_compress(c: &mut Criterion) {
    let patterns: [(&str, PatternGenerator); 3] = [
        ("random", test_data::random),
        ("skewed", test_data::skewed),
        ("text", test_data::text_like),
    ];
    let mut group = c.benchmark_group("huffman_compress");
    for (name, generator) in patterns {
        for &size in &[4 * 1024usize, 64 * 1024] {
            let data = generator(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| compress(black_box(data)));
            });
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decompress");
    for &size in &[4 * 1024usize, 64 * 1024] {
        let data = test_data::text_like(size);
        let Ok(compressed) = compress(&data) else {
            continue;
        };
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &compressed, |b, c| {
            b.iter(|| decompress(black_box(c)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
