use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlchain::{Expr, Fragment, PlaceholderFormat, SelectQb, SqlQb, qb};

/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> SelectQb {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    (0..n).fold(
        qb::select(columns)
            .with_placeholder_format(PlaceholderFormat::Dollar)
            .from("t"),
        |q, i| q.eq(format!("col{i}"), i as i64),
    )
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let select = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &select, |b, select| {
            b.iter(|| black_box(select.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_rewrite");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let select = build_select(n);
                black_box(select.build())
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let select = qb::select(["*"])
                    .with_placeholder_format(PlaceholderFormat::Dollar)
                    .from("t")
                    .in_list("id", values.iter().copied());
                black_box(select.build())
            });
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/nested_groups");

    for depth in [1, 4, 16] {
        let expr = (0..depth).fold(Expr::eq("a", 0), |inner, i| {
            Expr::or([Expr::and([inner, Expr::gt(format!("c{i}"), i)]), Expr::is_null("z")])
        });
        group.bench_with_input(BenchmarkId::from_parameter(depth), &expr, |b, expr| {
            b.iter(|| black_box(expr.to_sql()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_rewrite,
    bench_in_list,
    bench_nested_groups
);
criterion_main!(benches);
