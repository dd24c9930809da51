//! Benchmarks for transliteration and article rendering.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use lipi::{
    ArticleRenderer, ContentBlock, Script, ThemeStyleModel, TransliterationContext, Transliterator,
    generate_css,
};

const VERSE: &str = "धर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः । मामकाः पाण्डवाश्चैव किमकुर्वत सञ्जय ॥१॥";

fn sample_blocks() -> Vec<ContentBlock> {
    (0..50)
        .map(|i| {
            ContentBlock::new(
                i.to_string(),
                if i % 2 == 0 { "shloka" } else { "bhashya" },
                format!(
                    r#"<p>{VERSE}<span data-type="footnote" data-content="note {i}">*</span></p><p>{VERSE}</p>"#
                ),
            )
        })
        .collect()
}

fn bench_transliterate(c: &mut Criterion) {
    let engine = Transliterator::new();
    let text = VERSE.repeat(20);

    let mut group = c.benchmark_group("transliterate");
    for script in [Script::Iast, Script::Hk, Script::Kannada, Script::Tamil] {
        group.bench_function(script.id(), |b| {
            b.iter(|| engine.transliterate(black_box(&text), script).into_owned())
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let blocks = sample_blocks();
    let renderer = ArticleRenderer::new("reader").with_toc(true);

    c.bench_function("render_article", |b| {
        b.iter(|| renderer.render(black_box(&blocks)))
    });

    let article = renderer.render(&blocks);
    let mut ctx = TransliterationContext::default();
    ctx.hydrate();
    ctx.set_target_script("IAST");
    c.bench_function("to_html_in_iast", |b| b.iter(|| article.to_html_in(&ctx)));
}

fn bench_theme(c: &mut Criterion) {
    let model = ThemeStyleModel::default_for("gita");
    c.bench_function("generate_css", |b| {
        b.iter(|| generate_css(black_box(&model), "reader", Some("18px")))
    });
}

criterion_group!(benches, bench_transliterate, bench_render, bench_theme);
criterion_main!(benches);
