// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! End-to-end wipes through the public entry points.
//!
//! Every iteration wipes a fresh value; setup is excluded with
//! `iter_batched`.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use expunge::{zero_bytes, zero_integer, zero_text};
use expunge_host::Runtime;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench wipe
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

const SIZES: [usize; 4] = [16, 256, 4096, 65536];

fn bench_zero_bytes(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to start runtime");
    let mut group = c.benchmark_group("zero_bytes");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let secret = vec![0xA5u8; size];

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter_batched(
                || rt.bytes(&secret).expect("failed to allocate bytes"),
                |value| {
                    zero_bytes(Some(black_box(&value))).expect("failed to zero bytes");
                    value
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_zero_text(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to start runtime");
    let mut group = c.benchmark_group("zero_text");
    configure_group(&mut group);

    for (label, unit) in [("latin1", "k"), ("ucs2", "ключ"), ("ucs4", "🔑")] {
        for chars in [16, 4096] {
            let s = unit.repeat(chars / unit.chars().count());

            group.bench_with_input(BenchmarkId::new(label, chars), &s, |b, s| {
                b.iter_batched(
                    || rt.text(s).expect("failed to allocate text"),
                    |value| {
                        zero_text(Some(black_box(&value))).expect("failed to zero text");
                        value
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_zero_integer(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to start runtime");
    let mut group = c.benchmark_group("zero_integer");
    configure_group(&mut group);

    for value in [100_000i128, 1 << 64, i128::MAX] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, &v| {
            b.iter_batched(
                || rt.int(v).expect("failed to allocate integer"),
                |value| {
                    zero_integer(Some(black_box(&value))).expect("failed to zero integer");
                    value
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("refused/shared", |b| {
        let shared = rt.int(42).expect("failed to allocate integer");
        b.iter(|| black_box(zero_integer(Some(black_box(&shared)))).is_err());
    });

    group.finish();
}

criterion_group!(benches, bench_zero_bytes, bench_zero_text, bench_zero_integer);
criterion_main!(benches);
