//! Performance benchmarks for quickdash
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the key hot paths:
//! - Iteration core throughput over both container shapes
//! - Query operations layered on it (filter, group_by, sort_by)
//! - Nested-path reads and scaffolding writes

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quickdash::{filter, for_each, get, group_by, set, sort_by, Extractor, Key, Matcher, Value};

fn sample_sequence(len: usize) -> Value {
    Value::new_sequence(
        (0..len)
            .map(|idx| {
                let entry = Value::new_mapping();
                entry.set_entry(&Key::from("id"), Value::from(idx));
                entry.set_entry(&Key::from("group"), Value::from(idx % 7));
                entry
            })
            .collect(),
    )
}

/// Benchmark: raw traversal of a sequence
fn bench_for_each(c: &mut Criterion) {
    let arr = sample_sequence(1_000);

    c.bench_function("for_each_1000", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for_each(black_box(&arr), |_, _| {
                count += 1;
                Value::Undefined
            });
            black_box(count)
        })
    });
}

/// Benchmark: filter with a field predicate
fn bench_filter(c: &mut Criterion) {
    let arr = sample_sequence(1_000);

    c.bench_function("filter_1000", |b| {
        b.iter(|| {
            filter(
                black_box(&arr),
                Matcher::test(|el, _| {
                    el.get_entry(&Key::from("group"))
                        .is_some_and(|group| group.to_number() == 0.0)
                }),
            )
        })
    });
}

/// Benchmark: grouping into buckets
fn bench_group_by(c: &mut Criterion) {
    let arr = sample_sequence(1_000);

    c.bench_function("group_by_1000", |b| {
        b.iter(|| group_by(black_box(&arr), Extractor::from("group")))
    });
}

/// Benchmark: stable insertion sort (quadratic by design)
fn bench_sort_by(c: &mut Criterion) {
    let arr = sample_sequence(200);

    c.bench_function("sort_by_200", |b| {
        b.iter(|| sort_by(black_box(&arr), Extractor::from("group")))
    });
}

/// Benchmark: nested path reads and scaffolding writes
fn bench_path_accessor(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_accessor");

    let target = Value::new_mapping();
    let path: Vec<Key> = vec!["a".into(), 3usize.into(), "b".into()];
    set(&target, &path, Value::from(42)).unwrap();

    group.bench_function("get_nested", |b| {
        b.iter(|| get(black_box(&target), black_box(&path)))
    });

    group.bench_function("set_scaffolding", |b| {
        b.iter(|| {
            let fresh = Value::new_mapping();
            set(&fresh, black_box(&path), Value::from(42)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_for_each,
    bench_filter,
    bench_group_by,
    bench_sort_by,
    bench_path_accessor
);
criterion_main!(benches);
