use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use msorm::{DialectConfig, Dialect, Escaper, FilterQuery, Query, set_all};

/// SELECT col0, col1, ... FROM t WHERE col0 = @p1 AND col1 = @p2 ...
fn build_select_query(n: usize) -> Query {
    let mut query = Query::from("t").select((0..n).map(|i| format!("col{i}")));
    for i in 0..n {
        query = query.filter(FilterQuery::eq(format!("col{i}"), i as i64));
    }
    query
}

fn bench_select(c: &mut Criterion) {
    let dialect = Dialect::mssql();
    let mut group = c.benchmark_group("sql_builder/select");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select_query(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(dialect.query().build(query)));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let dialect = Dialect::mssql();
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let query = Query::from("t").filter(FilterQuery::in_("id", 0..n as i64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(dialect.query().build(query)));
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let dialect = Dialect::mssql();
    let mut group = c.benchmark_group("sql_builder/insert");

    for n in [1, 10, 50] {
        let mutates = set_all((0..n).map(|i| (format!("col{i}"), i as i64)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &mutates, |b, mutates| {
            b.iter(|| black_box(dialect.insert().build("t", "id", mutates)));
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/escape");
    let fields = ["name", "users.email", "COUNT(orders.id) AS total", "dbo.t.*"];

    let cached = Escaper::new(&DialectConfig::default());
    group.bench_function("cached", |b| {
        b.iter(|| {
            for field in fields {
                black_box(cached.escape(field));
            }
        });
    });

    group.bench_function("cold", |b| {
        b.iter(|| {
            let escaper = Escaper::new(&DialectConfig::default());
            for field in fields {
                black_box(escaper.escape(field));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_select, bench_in_list, bench_insert, bench_escape);
criterion_main!(benches);
