//! Performance benchmarks for TextHash
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use texthash::config::HashAlgorithm;
use texthash::hash::{generate_all_hashes, generate_hash, verify_text_hash, HashOptions};

/// Deterministic text of the requested size
fn sample_text(size: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(size)
        .collect()
}

fn bench_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");

    let data_size = 1024 * 1024; // 1 MiB
    let text = sample_text(data_size);

    group.throughput(Throughput::Bytes(data_size as u64));

    for algo in HashAlgorithm::ALL {
        let options = HashOptions::new(algo);
        group.bench_with_input(BenchmarkId::new("hash", algo.name()), &text, |b, text| {
            b.iter(|| black_box(generate_hash(text, &options).unwrap()));
        });
    }

    group.finish();
}

fn bench_generate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all");

    for size in [64usize, 64 * 1024, 1024 * 1024] {
        let text = sample_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("all", humansize::format_size(size as u64, humansize::BINARY)),
            &text,
            |b, text| {
                b.iter(|| black_box(generate_all_hashes(text, false).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let text = sample_text(4096);
    let expected = generate_hash(&text, &HashOptions::new(HashAlgorithm::Sha256)).unwrap();

    c.bench_function("verify_sha256_4k", |b| {
        b.iter(|| black_box(verify_text_hash(&text, &expected, HashAlgorithm::Sha256).unwrap()));
    });
}

criterion_group!(benches, bench_hash_algorithms, bench_generate_all, bench_verify);

criterion_main!(benches);
