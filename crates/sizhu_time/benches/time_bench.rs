use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sizhu_time::{SolarTimeMode, correct, equation_of_time_seconds, local_to_utc};

fn solar_time_bench(c: &mut Criterion) {
    let local = NaiveDate::from_ymd_opt(1985, 10, 6)
        .and_then(|d| d.and_hms_opt(19, 30, 0))
        .unwrap_or_default();

    let mut group = c.benchmark_group("solar_time");
    group.bench_function("local_to_utc", |b| {
        b.iter(|| local_to_utc(black_box(local), black_box(540)))
    });
    group.bench_function("equation_of_time", |b| {
        b.iter(|| equation_of_time_seconds(black_box(279)))
    });
    group.bench_function("correct_tst", |b| {
        b.iter(|| {
            correct(
                black_box(local),
                540,
                SolarTimeMode::TrueSolar {
                    longitude_deg: 126.978,
                },
            )
        })
    });
    group.finish();
}

criterion_group!(benches, solar_time_bench);
criterion_main!(benches);
