//! Rendering content blocks into a themed, transliterable article.

use lipi::render::{CitationDetails, CitationState};
use lipi::{
    ArticleRenderer, CitationIndex, CitationLookup, ContentBlock, Error, Script,
    ThemeStyleModel, TransliterationContext, generate_css,
};

fn hydrated() -> TransliterationContext {
    let mut ctx = TransliterationContext::default();
    ctx.hydrate();
    ctx
}

fn blocks_from_json() -> Vec<ContentBlock> {
    serde_json::from_str(
        r#"[
            {"id": "s1", "type": "sutra", "sanskrit": "<p>नमस्ते<span data-type=\"footnote\" data-content=\"First note\">*</span></p>"},
            {"id": "c1", "type": "bhashya", "sanskrit": "<p>सीता<span data-type=\"footnote\" data-content=\"Second note\">*</span></p>",
             "commentary": {"type": "bhashya", "author": "Vyāsa", "workName": "Yogabhāṣya", "shortName": "Vyā."}}
        ]"#,
    )
    .unwrap()
}

#[test]
fn test_footnotes_are_numbered_across_blocks_and_linked_both_ways() {
    let article = ArticleRenderer::new("reader").render(&blocks_from_json());
    let html = article.to_html();

    for n in 1..=2 {
        assert!(html.contains(&format!(
            r##"<a id="ref-footnote-{n}" href="#footnote-{n}">[{n}]</a>"##
        )));
        assert!(html.contains(&format!(r#"<li id="footnote-{n}">"#)));
        assert!(html.contains(&format!(r##"href="#ref-footnote-{n}""##)));
    }
    assert_eq!(article.footnotes(), ["First note", "Second note"]);

    // The list comes once, after the last block.
    assert_eq!(html.matches(r#"<section class="footnotes">"#).count(), 1);
    let list = html.find(r#"<section class="footnotes">"#).unwrap();
    assert!(list > html.find(r#"id="block-c1""#).unwrap());
}

#[test]
fn test_special_notes_have_their_own_series() {
    let blocks = vec![ContentBlock::new(
        "1",
        "teeka",
        r#"<p>a<span data-type="footnote" data-content="f"></span>b<span data-type="specialnote" data-content="s"></span></p>"#,
    )];
    let html = ArticleRenderer::default().render(&blocks).to_html();
    assert!(html.contains(r##"<sup class="specialnote-ref"><a id="ref-specialnote-1" href="#specialnote-1">[1]</a></sup>"##));
    assert!(html.contains(r##"<a id="ref-footnote-1" href="#footnote-1">[1]</a>"##));
    assert!(html.contains(r#"<section class="special-notes">"#));
}

#[test]
fn test_switching_scripts_never_compounds() {
    let blocks = vec![ContentBlock::new("1", "sutra", "<p>नमस्ते</p>")];
    let article = ArticleRenderer::new("reader").render(&blocks);
    let original = article.to_html();

    let mut ctx = hydrated();
    ctx.set_target_script("IAST");
    let iast = article.to_html_in(&ctx);
    assert!(iast.contains("<p>namaste</p>"));

    ctx.set_target_script("HK");
    assert!(article.to_html_in(&ctx).contains("<p>namaste</p>"));

    ctx.set_target_script("DEVANAGARI");
    assert_eq!(article.to_html_in(&ctx), original);
    assert!(original.contains("<p>नमस्ते</p>"));
}

#[test]
fn test_labels_and_markers_keep_their_script() {
    let mut ctx = hydrated();
    ctx.set_target_script("IAST");
    let html = ArticleRenderer::default()
        .render(&blocks_from_json())
        .to_html_in(&ctx);

    // Headings sit outside the transliterated body.
    assert!(html.contains("bhāṣyam / भाष्यम्"));
    assert!(html.contains(r#"<span class="commentary-name" title="Vyāsa, Yogabhāṣya">Vyā.</span>"#));
    assert!(html.contains(r#"<div class="paragraph">sītā<sup"#));
}

#[test]
fn test_unhydrated_context_renders_devanagari() {
    let mut ctx = TransliterationContext::default();
    ctx.set_target_script("IAST");
    let article = ArticleRenderer::default().render(&blocks_from_json());
    assert_eq!(ctx.effective_script(), Script::Devanagari);
    assert_eq!(article.to_html_in(&ctx), article.to_html());
}

struct Offline;

impl CitationLookup for Offline {
    fn lookup(&self, _reference: &str) -> lipi::Result<Option<CitationDetails>> {
        Err(Error::Citation("network unreachable".to_string()))
    }
}

#[test]
fn test_citations_resolve_when_shown() {
    let blocks = vec![ContentBlock::new(
        "1",
        "bhashya",
        r#"<p><span data-citation-node data-citation-id="bg-2.47">BG 2.47</span> and <span data-citation="true" data-ref="missing">?</span></p>"#,
    )];
    let mut article = ArticleRenderer::default().render(&blocks);
    assert_eq!(article.citations().len(), 2);
    assert_eq!(article.to_html().matches("Loading citation...").count(), 2);

    let index = CitationIndex::from_json(
        r#"{"bg-2.47": {"source": "Bhagavadgītā", "location": "2.47"}}"#,
    )
    .unwrap();
    assert_eq!(article.show_all_citations(&index), 2);
    assert_eq!(article.show_all_citations(&index), 0);

    assert!(matches!(article.citations()[0].state, CitationState::Loaded(_)));
    assert_eq!(article.citations()[1].state, CitationState::NotFound);

    let html = article.to_html();
    assert!(html.contains(r#"<span class="citation-location">2.47</span>"#));
    assert!(html.contains("Citation not found"));
    assert!(!html.contains("Loading citation..."));
}

#[test]
fn test_failed_citation_is_not_left_loading() {
    let blocks = vec![ContentBlock::new(
        "1",
        "bhashya",
        r#"<span data-citation-node data-citation-id="ys-1.1">YS</span>"#,
    )];
    let mut article = ArticleRenderer::default().render(&blocks);
    let state = article.show_citation(0, &Offline).cloned();
    assert!(matches!(state, Some(CitationState::Failed(_))));

    let html = article.to_html();
    assert!(html.contains(r#"data-state="failed""#));
    assert!(html.contains("Citation unavailable"));
}

#[test]
fn test_page_injects_scoped_theme() {
    let article = ArticleRenderer::new("reader").render(&blocks_from_json());
    let sheet = generate_css(&ThemeStyleModel::default_for("ys"), "reader", Some("19px"));
    let page = article.to_page(&sheet, &hydrated());

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert_eq!(page.matches("<style").count(), 1);
    assert!(page.contains(r#"<div id="reader" class="themed-document">"#));
    assert!(page.contains("font-size: 19px !important;"));
    let style = page.find("<style").unwrap();
    let body = page.find("<body>").unwrap();
    assert!(style < body);
}
