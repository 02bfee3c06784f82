//! Benchmarks for alignment performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks align synthetic wiki-like pages with a hint block.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a local/foreign page pair with the given number of sections.
fn create_test_pair(section_count: usize) -> (bitext::Document, bitext::Document) {
    let mut local = String::new();
    let mut foreign = String::new();

    local.push_str(r#"<div class="bilingual-hints" data-lang="de"><pre>"#);
    for i in 0..section_count {
        local.push_str(&format!("\nSection {} = Abschnitt {}", i, i));
    }
    local.push_str("\n</pre></div>");

    local.push_str(r#"<div class="mw-parser-output">"#);
    foreign.push_str(r#"<div class="mw-parser-output">"#);
    for i in 0..section_count {
        local.push_str(&format!(
            "<h2 id=\"s{i}\">Section {i} </h2><p>First paragraph with <a href=\"/Link_{i}\">a link</a>.</p>\
             <p>Second paragraph <b>bold</b>.</p><ul><li>item</li></ul>"
        ));
        foreign.push_str(&format!(
            "<h2 id=\"s{i}\">Abschnitt {i} </h2><p>Erster Absatz mit <a href=\"/Link_{i}\">Link</a>.</p>\
             <p>Zweiter Absatz <b>fett</b>.</p><ul><li>Punkt</li></ul>"
        ));
    }
    local.push_str("</div>");
    foreign.push_str("</div>");

    (
        bitext::Document::new(local, "en"),
        bitext::Document::new(foreign, "de"),
    )
}

/// Benchmark single-pair alignment at various sizes.
fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");

    for section_count in [1, 10, 100].iter() {
        let (local, foreign) = create_test_pair(*section_count);
        let options = bitext::AlignOptions::default();

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| bitext::align(black_box(&local), black_box(&foreign), &options));
        });
    }

    group.finish();
}

/// Benchmark table rendering of an existing alignment.
fn bench_render(c: &mut Criterion) {
    let (local, foreign) = create_test_pair(50);
    let alignment = bitext::Bitext::new().align(&local, &foreign);
    let options = bitext::RenderOptions::default();

    c.bench_function("render_50_sections", |b| {
        b.iter(|| black_box(&alignment).to_html(&options));
    });
}

/// Benchmark batch alignment, parallel and sequential.
fn bench_batch(c: &mut Criterion) {
    let pairs: Vec<_> = (0..32).map(|_| create_test_pair(10)).collect();
    let parallel = bitext::Bitext::new();
    let sequential = bitext::Bitext::new().sequential();

    c.bench_function("batch_32_parallel", |b| {
        b.iter(|| parallel.align_batch(black_box(&pairs)));
    });
    c.bench_function("batch_32_sequential", |b| {
        b.iter(|| sequential.align_batch(black_box(&pairs)));
    });
}

criterion_group!(benches, bench_align, bench_render, bench_batch);
criterion_main!(benches);
