use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlgen::{Filter, FilterGroup, Formatter, Function, OrderBy, SelectBuilder, Window};

/// SELECT t.col0, ... FROM t WHERE t.col0 = 0 AND t.col1 = 1 ... ORDER BY t.col0
fn build_select(n: usize) -> SelectBuilder {
    let mut select = SelectBuilder::new();
    let t = select.add_table("t").unwrap();
    for i in 0..n {
        let column = t.column(format!("col{i}")).unwrap();
        select
            .add_projection(column.clone())
            .add_where(Filter::equal_to(column, i));
    }
    select.add_order_by(OrderBy::ascending(t.column("col0").unwrap()));
    select
}

/// `depth` nested OR groups, each wrapping an AND of two comparisons.
fn build_nested_filters(depth: usize) -> SelectBuilder {
    let mut filter = Filter::equal_to(0, 0);
    for i in 0..depth {
        let mut and = FilterGroup::and();
        and.add_filter(Filter::less_than(i, i + 1))
            .add_filter(Filter::greater_than(i + 1, i));
        let mut or = FilterGroup::or();
        or.add_filter(filter).add_filter(Filter::from(and).wrapped());
        filter = Filter::from(or).wrapped();
    }
    let mut select = SelectBuilder::new();
    select.add_projection(1).add_where(filter);
    select
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/select");
    let formatter = Formatter::new();

    for n in [1, 5, 10, 50, 100] {
        let select = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &select, |b, select| {
            b.iter(|| black_box(formatter.render(select)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");
    let formatter = Formatter::new();

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let select = build_select(n);
                black_box(formatter.render(&select));
            });
        });
    }

    group.finish();
}

fn bench_nested_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/nested_filters");
    let formatter = Formatter::new();

    for depth in [1, 8, 32] {
        let select = build_nested_filters(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &select, |b, select| {
            b.iter(|| black_box(formatter.render(select)));
        });
    }

    group.finish();
}

fn bench_window_function(c: &mut Criterion) {
    let mut select = SelectBuilder::new();
    let sale = select.add_table("sale").unwrap();
    let mut window = Window::new();
    window
        .add_partition(sale.column("prod_id").unwrap())
        .add_order_by(OrderBy::new(sale.column("month_num").unwrap()));
    select.add_projection(
        Function::new("SUM")
            .unwrap()
            .arg(sale.column("sales").unwrap())
            .over(window),
    );
    let formatter = Formatter::new();

    c.bench_function("render/window_function", |b| {
        b.iter(|| black_box(formatter.render(&select)));
    });
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_nested_filters,
    bench_window_function
);
criterion_main!(benches);
