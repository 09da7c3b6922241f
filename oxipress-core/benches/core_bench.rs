//! Benchmarks for the core primitives
//!
//! - CRC-32 throughput, bytewise vs slicing-by-8 sizes
//! - Frequency table construction
//! - Bit writer throughput for short variable-length codes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxipress_core::bitstream::BitWriter;
use oxipress_core::crc::Crc32;
use oxipress_core::frequency::FrequencyTable;
use std::hint::black_box;

fn lcg_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn bench_crc32(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32");
    for &size in &[15usize, 1024, 64 * 1024, 1024 * 1024] {
        let data = lcg_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| Crc32::compute(black_box(data)));
        });
    }
    group.finish();
}

fn bench_frequency(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_table");
    for &size in &[4 * 1024usize, 256 * 1024] {
        let data = lcg_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("serial", size), &data, |b, data| {
            b.iter(|| FrequencyTable::from_bytes(black_box(data)));
        });
        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &data, |b, data| {
            b.iter(|| FrequencyTable::from_bytes_parallel(black_box(data)));
        });
    }
    group.finish();
}

fn bench_bit_writer(c: &mut Criterion) {
    let codes = lcg_bytes(64 * 1024);
    let mut group = c.benchmark_group("bit_writer");
    group.throughput(Throughput::Elements(codes.len() as u64));
    group.bench_function("write_3_to_10_bits", |b| {
        b.iter(|| {
            let mut writer = BitWriter::with_capacity(codes.len());
            for &v in &codes {
                writer.write_bits(u64::from(v), 3 + v % 8);
            }
            black_box(writer.finish())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_crc32, bench_frequency, bench_bit_writer);
criterion_main!(benches);
