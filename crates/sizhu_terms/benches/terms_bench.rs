use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sizhu_terms::{SolarTerm, SolarTermResolver, TermTable, bundled_precise};

fn resolver_bench(c: &mut Criterion) {
    let resolver = SolarTermResolver::bundled();
    let instant = Utc
        .with_ymd_and_hms(1985, 10, 6, 10, 30, 0)
        .single()
        .unwrap_or_default();

    let mut group = c.benchmark_group("resolver");
    group.bench_function("resolve", |b| {
        b.iter(|| resolver.resolve(black_box(SolarTerm::Lichun), black_box(1985)))
    });
    group.bench_function("nearest_lichun", |b| {
        b.iter(|| resolver.nearest_occurrence(black_box(instant), SolarTerm::Lichun, 1985))
    });
    group.bench_function("latest_lichun", |b| {
        b.iter(|| {
            resolver.latest_occurrence_at_or_before(black_box(instant), SolarTerm::Lichun, 1985)
        })
    });
    group.bench_function("latest_sectional", |b| {
        b.iter(|| resolver.latest_sectional_at_or_before(black_box(instant), 1985))
    });
    group.finish();
}

fn dataset_bench(c: &mut Criterion) {
    let text = include_str!("../data/solar_terms_precise.csv");

    let mut group = c.benchmark_group("dataset");
    group.sample_size(10);
    group.bench_function("parse_precise", |b| {
        b.iter(|| TermTable::precise_from_csv_str(black_box(text)).map(|t| t.len()))
    });
    group.bench_function("bundled_cached", |b| b.iter(|| bundled_precise().len()));
    group.finish();
}

criterion_group!(benches, resolver_bench, dataset_bench);
criterion_main!(benches);
