use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlj::statement::{InsertSpec, SelectSpec, build_insert, build_select};
use sqlj::{Field, OrderSpec, WhereClause, placeholder};

/// `col0 = ? AND col1 = ? ...` with `n` markers.
fn marker_text(n: usize) -> String {
    (0..n)
        .map(|i| format!("col{i} = ?"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/rewrite");

    for n in [1, 5, 10, 50, 100] {
        let text = marker_text(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| black_box(placeholder::rewrite(text, 0)));
        });
    }

    group.finish();
}

fn bench_select_with_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/select_page");
    let columns = ["id", "title", "body", "created_at"];
    let order = [OrderSpec::desc("created_at"), OrderSpec::asc("id")];

    for n in [1, 5, 10, 50] {
        let clauses: Vec<WhereClause> = (0..n)
            .map(|i| WhereClause::and(format!("col{i} = ?")))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &clauses, |b, clauses| {
            b.iter(|| {
                black_box(build_select(&SelectSpec {
                    where_clauses: clauses,
                    order: &order,
                    limit: true,
                    offset: true,
                    ..SelectSpec::new(&columns, "posts")
                }))
            });
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/insert");

    for n in [5, 20, 100] {
        let fields: Vec<Field> = (0..n)
            .map(|i| {
                if i % 5 == 0 {
                    Field::literal(format!("col{i}"), "now()")
                } else {
                    Field::value(format!("col{i}"), i as i64)
                }
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &fields, |b, fields| {
            b.iter(|| {
                black_box(build_insert(&InsertSpec {
                    table: "t",
                    fields,
                    returning: &["id"],
                }))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rewrite, bench_select_with_page, bench_insert);
criterion_main!(benches);
