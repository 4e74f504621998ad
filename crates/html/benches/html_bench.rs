use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use html::{parse_fragment, tokenize};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn make_blocks(n: usize) -> String {
    let mut out = String::with_capacity(n * 64);
    for i in 0..n {
        out.push_str(&format!(
            "<div class=box data-index=\"{i}\"><span>hello &amp; bye</span><img src=x></div>"
        ));
    }
    out
}

fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    body.push_str("<script>");
    while body.len() < bytes {
        body.push_str("</scri<pt");
    }
    body.push_str("</script>");
    body
}

fn bench_tokenize_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_tokenize_small", |b| {
        b.iter(|| black_box(tokenize(black_box(&input)).len()));
    });
}

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| black_box(tokenize(black_box(&input)).len()));
    });
}

fn bench_parse_fragment_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_parse_fragment_large", |b| {
        b.iter(|| black_box(parse_fragment(black_box(&input)).child_count()));
    });
}

fn bench_rawtext_adversarial(c: &mut Criterion) {
    c.bench_function("bench_rawtext_adversarial", |b| {
        b.iter_batched(
            || make_rawtext_adversarial(256 * 1024),
            |input| black_box(tokenize(&input).len()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_tokenize_small,
    bench_tokenize_large,
    bench_parse_fragment_large,
    bench_rawtext_adversarial
);
criterion_main!(benches);
