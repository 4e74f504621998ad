use builder::{AttrValue, AttributeBag, Child, TagName, attrs, builder_for, create, tags};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

const SMALL_ROWS: usize = 64;
const LARGE_ROWS: usize = 5_000;

fn row_attrs(i: usize) -> AttributeBag {
    attrs! {
        "className" => if i % 2 == 0 { "row even" } else { "row odd" },
        "dataRowIndex" => i.to_string(),
        "style" => AttrValue::object([("paddingLeft", AttrValue::from(4)), ("color", "gray".into())]),
        "onClick" => AttrValue::handler(|_| {}),
    }
}

fn build_table(rows: usize) -> usize {
    let mut body = Vec::with_capacity(rows);
    for i in 0..rows {
        let row = tags::tr(
            row_attrs(i),
            vec![
                Child::from(tags::td(None, "cell").ok()),
                Child::from(tags::td(None, i.to_string()).ok()),
            ],
        );
        body.push(Child::from(row.ok()));
    }
    tags::tbody(None, body).map_or(0, |n| n.child_count())
}

fn bench_table_small(c: &mut Criterion) {
    c.bench_function("bench_table_small", |b| {
        b.iter(|| black_box(build_table(black_box(SMALL_ROWS))));
    });
}

fn bench_table_large(c: &mut Criterion) {
    c.bench_function("bench_table_large", |b| {
        b.iter(|| black_box(build_table(black_box(LARGE_ROWS))));
    });
}

fn bench_cached_vs_generic(c: &mut Criterion) {
    let li = builder_for(TagName::Li);
    c.bench_function("bench_cached_li", |b| {
        b.iter(|| black_box(li(None, "item".into()).map(|n| n.child_count())));
    });
    c.bench_function("bench_generic_li", |b| {
        b.iter(|| black_box(create(black_box("li"), None, "item").map(|n| n.child_count())));
    });
}

fn bench_attribute_heavy(c: &mut Criterion) {
    c.bench_function("bench_attribute_heavy", |b| {
        b.iter_batched(
            || row_attrs(7),
            |bag| black_box(tags::div(bag, ()).map(|n| n.attributes().len())),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_table_small,
    bench_table_large,
    bench_cached_vs_generic,
    bench_attribute_heavy
);
criterion_main!(benches);
