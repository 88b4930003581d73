//! Benchmarks for the highlight scan and preview render.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markpad::markdown::{highlight, render};

fn sample_document() -> String {
    let section = "# Heading\n\nSome **bold**, *italic* and `code` text with a [link](https://example.com).\n\n\
                   > quoted line\n\n- item one\n- item two\n\n```rust\nfn main() {}\n```\n\n---\n\n";
    section.repeat(50)
}

fn bench_highlight(c: &mut Criterion) {
    let text = sample_document();
    c.bench_function("highlight", |b| b.iter(|| highlight(black_box(&text))));
}

fn bench_render(c: &mut Criterion) {
    let text = sample_document();
    c.bench_function("render", |b| b.iter(|| render(black_box(&text))));
}

criterion_group!(benches, bench_highlight, bench_render);
criterion_main!(benches);
