use criterion::{Criterion, black_box, criterion_group, criterion_main};
use review_core::{
    DocumentContext, OverlayConfig, OverlayController, PendingEdit, locate, resolve,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the  quick brown fox\tjumps over the lazy dog (review-core benchmark line)\n"
        ));
    }
    out.pop();
    out
}

fn bench_locate_exact(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("locate/exact_tail_50k_lines", |b| {
        b.iter(|| {
            black_box(locate(
                black_box(&text),
                "049999 the  quick brown fox\tjumps",
            ))
        })
    });
}

fn bench_locate_normalized(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("locate/normalized_tail_50k_lines", |b| {
        b.iter(|| {
            black_box(locate(
                black_box(&text),
                "049999 the quick brown fox jumps over",
            ))
        })
    });
}

fn bench_resolve_word(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("resolve/middle_line_50k_lines", |b| {
        b.iter(|| black_box(resolve(black_box(&text), 25_000, 12)))
    });
}

fn bench_show_edit(c: &mut Criterion) {
    let text = large_text(10_000);
    let edit = PendingEdit::new(
        "bench",
        "bench.txt",
        "005000 the quick brown fox",
        "005000 a much slower fox\nthat now spans two lines",
    );
    c.bench_function("overlay/show_edit_10k_lines", |b| {
        b.iter(|| {
            let mut controller = OverlayController::new(OverlayConfig::default(), 100);
            let doc = DocumentContext::new(Some("bench.txt"), &text);
            black_box(controller.show_edit(edit.clone(), doc))
        })
    });
}

criterion_group!(
    benches,
    bench_locate_exact,
    bench_locate_normalized,
    bench_resolve_word,
    bench_show_edit
);
criterion_main!(benches);
