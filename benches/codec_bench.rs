use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use huffer::{decode, encode, SymbolSize};

fn sample_input() -> Vec<u8> {
    // Skewed byte distribution so the tree actually earns its keep.
    (0..64 * 1024u32)
        .map(|i| ((i * i) % 59) as u8)
        .collect()
}

fn bench_single_byte_symbols(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_1byte");
    let input = sample_input();
    let size = SymbolSize::new(1).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            encode(Cursor::new(&input), &mut out, size).unwrap();
            out
        })
    });

    let mut compressed = Vec::new();
    encode(Cursor::new(&input), &mut compressed, size).unwrap();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            decode(compressed.as_slice(), &mut out).unwrap();
            out
        })
    });
}

fn bench_wide_symbols(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_4byte");
    let input = sample_input();
    let size = SymbolSize::new(4).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            encode(Cursor::new(&input), &mut out, size).unwrap();
            out
        })
    });

    let mut compressed = Vec::new();
    encode(Cursor::new(&input), &mut compressed, size).unwrap();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            decode(compressed.as_slice(), &mut out).unwrap();
            out
        })
    });
}

criterion_group!(benches, bench_single_byte_symbols, bench_wide_symbols);
criterion_main!(benches);
