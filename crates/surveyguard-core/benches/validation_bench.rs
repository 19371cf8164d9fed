use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use once_cell::sync::Lazy;
use serde_json::json;
use std::hint::black_box;
use surveyguard_core::{compiler::compile_rules, RawRecord, RuleSet, TypeCoercer, ValidationEngine};

static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_json(&json!({
        "id": {"type": "str", "required": true, "len_min": 1, "unique": true},
        "age": {"type": "int", "min": 0, "max": 120, "required": true},
        "consent": {"type": "bool", "required": true},
        "score": {"type": "float", "min": 0.0, "max": 5.0},
        "joined": {"type": "datetime:%Y-%m-%d", "regex": "^2024-"}
    }))
    .unwrap()
});

fn age(i: usize) -> String {
    if i % 10 == 0 {
        "n/a".to_string()
    } else {
        (i % 130).to_string()
    }
}

/// Survey-like records with roughly one bad cell in ten.
fn create_records(size: usize) -> Vec<RawRecord> {
    (0..size)
        .map(|i| {
            RawRecord::from_iter([
                ("id", format!("R{}", i % (size - size / 20).max(1))),
                ("age", age(i)),
                ("consent", if i % 2 == 0 { "yes" } else { "no" }.to_string()),
                ("score", format!("{:.1}", (i % 60) as f64 / 10.0)),
                ("joined", format!("2024-{:02}-{:02}", i % 13 + 1, i % 28 + 1)),
            ])
        })
        .collect()
}

static RECORDS: Lazy<Vec<(usize, Vec<RawRecord>)>> = Lazy::new(|| {
    [1_000usize, 10_000, 100_000]
        .iter()
        .map(|&size| (size, create_records(size)))
        .collect()
});

fn bench_validate(c: &mut Criterion) {
    let coercer = TypeCoercer::default();
    let columns = compile_rules(&RULES, &coercer).unwrap();
    let engine = ValidationEngine::new(&columns, &coercer);

    let mut group = c.benchmark_group("validate_sequential");
    for (size, records) in RECORDS.iter() {
        group.throughput(criterion::Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), records, |b, records| {
            b.iter(|| black_box(engine.validate_records(records).len()));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("validate_partitioned");
    for (size, records) in RECORDS.iter() {
        group.throughput(criterion::Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), records, |b, records| {
            b.iter(|| black_box(engine.validate_partitioned(records, 4 * 1024).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
