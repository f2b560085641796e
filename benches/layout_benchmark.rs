//! Benchmarks for udf2pdf layout performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise the pagination hot path with synthetic payload
//! text of varying shapes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use udf2pdf::layout::{paginate, wrap_line, FontMetrics, PageGeometry};

/// Build a payload of `lines` logical lines, each `words` words long.
fn synthetic_payload(lines: usize, words: usize) -> String {
    let line = vec!["kelime"; words].join(" ");
    vec![line; lines].join("\n")
}

fn bench_paginate(c: &mut Criterion) {
    let geometry = PageGeometry::default();
    let metrics = FontMetrics::default();

    let short = synthetic_payload(100, 8);
    c.bench_function("paginate_100_short_lines", |b| {
        b.iter(|| paginate(black_box(&short), &geometry, &metrics))
    });

    let long = synthetic_payload(2_000, 40);
    c.bench_function("paginate_2000_wrapping_lines", |b| {
        b.iter(|| paginate(black_box(&long), &geometry, &metrics))
    });

    let oversized: String = std::iter::repeat('x').take(50_000).collect();
    c.bench_function("paginate_oversized_token", |b| {
        b.iter(|| paginate(black_box(&oversized), &geometry, &metrics))
    });
}

fn bench_wrap(c: &mut Criterion) {
    let line = vec!["orta"; 200].join(" ");
    c.bench_function("wrap_line_80_cols", |b| {
        b.iter(|| wrap_line(black_box(&line), 80))
    });
}

criterion_group!(benches, bench_paginate, bench_wrap);
criterion_main!(benches);
