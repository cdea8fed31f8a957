use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dataquery::{evaluate, parse, Record, RecordStore};

fn populated_store(n: usize) -> RecordStore {
    let mut store = RecordStore::new();
    for i in 0..n {
        store.upsert(Record::new(
            i.to_string(),
            if i % 2 == 0 { "request" } else { "offer" },
            "content",
            (i % 100) as i64,
            i as i64,
        ));
    }
    store
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_or", |b| {
        b.iter(|| {
            parse(black_box(
                "OR(EQUAL(title,'request'),GREATER_THAN(views,50),LESS_THAN(timestamp,10))",
            ))
        })
    });
    c.bench_function("parse_nested_not", |b| {
        b.iter(|| parse(black_box("NOT(NOT(NOT(EQUAL(id,'42'))))")))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let queries = [
        ("equal", "EQUAL(title,'request')"),
        ("not", "NOT(GREATER_THAN(views,50))"),
        ("and", "AND(EQUAL(title,'request'),GREATER_THAN(views,50))"),
        ("or", "OR(EQUAL(title,'offer'),LESS_THAN(timestamp,100))"),
    ];

    for size in [100, 1_000, 10_000] {
        let store = populated_store(size);
        for (name, query) in queries {
            let expr = parse(query).unwrap();
            group.bench_with_input(BenchmarkId::new(name, size), &expr, |b, expr| {
                b.iter(|| evaluate(black_box(expr), store.scan()))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate);
criterion_main!(benches);
