//! Article rendering.
//!
//! [`ArticleRenderer`] turns an ordered list of [`ContentBlock`]s into a
//! [`RenderedArticle`]: a themed document tree with numbered footnotes,
//! special notes, citation hover cards and an optional table of contents.
//!
//! The rendered tree always holds the stored Devanagari. Output in another
//! script is produced at serialization time from the context's current
//! selection, so switching scripts never compounds and switching back gives
//! the exact original text.
//!
//! ```
//! use lipi::content::ContentBlock;
//! use lipi::render::ArticleRenderer;
//!
//! let blocks = vec![ContentBlock::new("1", "sutra", "<p>अथ योगानुशासनम्</p>")];
//! let article = ArticleRenderer::new("reader").render(&blocks);
//! assert!(article.to_html().contains("अथ योगानुशासनम्"));
//! ```

mod citation;
mod notes;
mod toc;
mod transliterate;

use std::collections::HashMap;

use crate::content::{CitationRef, ContentBlock, ContentNode, ElementNode, parse_content};
use crate::context::TransliterationContext;
use crate::dom::{Attribute, Dom, NodeId, serialize_node};
use crate::prefs::PreferenceStore;
use crate::theme::ThemeStylesheet;

pub use citation::{CitationCard, CitationDetails, CitationIndex, CitationLookup, CitationState};
pub use notes::{NoteKind, NoteRegistry};
pub use toc::{TocBuilder, TocEntry, heading_level, slugify};
pub use transliterate::{is_region, region_text_nodes, transliteration_overrides};

const PENDING_TEXT: &str = "Loading citation...";
const NOT_FOUND_TEXT: &str = "Citation not found";
const FAILED_TEXT: &str = "Citation unavailable";

/// Renders content blocks into an article tree.
#[derive(Debug, Clone)]
pub struct ArticleRenderer {
    scope: String,
    toc: bool,
}

impl Default for ArticleRenderer {
    fn default() -> Self {
        Self::new("lipi-article")
    }
}

impl ArticleRenderer {
    /// `scope` becomes the id of the outer container and must match the
    /// scope the theme stylesheet was generated for.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            toc: false,
        }
    }

    /// Emit a `nav.toc` before the blocks and give headings stable ids.
    pub fn with_toc(mut self, enabled: bool) -> Self {
        self.toc = enabled;
        self
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn render(&self, blocks: &[ContentBlock]) -> RenderedArticle {
        let mut builder = Builder {
            dom: Dom::new(),
            notes: NoteRegistry::new(),
            cards: Vec::new(),
            toc: self.toc.then(TocBuilder::new),
        };

        let document = builder.dom.document();
        let root = builder.element(
            document,
            "div",
            &[("id", self.scope.as_str()), ("class", "themed-document")],
        );
        let article = builder.element(root, "article", &[("class", "article-content")]);
        let nav = self
            .toc
            .then(|| builder.element(article, "nav", &[("class", "toc")]));

        for block in blocks {
            builder.block(article, block);
        }
        builder.note_list(article, NoteKind::Footnote);
        builder.note_list(article, NoteKind::SpecialNote);

        let toc = builder
            .toc
            .take()
            .map(TocBuilder::into_entries)
            .unwrap_or_default();
        if let Some(nav) = nav {
            if toc.is_empty() {
                builder.dom.detach(nav);
            } else {
                builder.toc_list(nav, &toc);
            }
        }

        tracing::debug!(
            blocks = blocks.len(),
            footnotes = builder.notes.notes(NoteKind::Footnote).len(),
            special_notes = builder.notes.notes(NoteKind::SpecialNote).len(),
            citations = builder.cards.len(),
            headings = toc.len(),
            "article rendered"
        );

        RenderedArticle {
            dom: builder.dom,
            root,
            scope: self.scope.clone(),
            citations: builder.cards,
            notes: builder.notes,
            toc,
        }
    }
}

fn append_element(dom: &mut Dom, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute::new(name, *value))
        .collect();
    let id = dom.create_html_element(tag, attrs);
    dom.append(parent, id);
    id
}

struct Builder {
    dom: Dom,
    notes: NoteRegistry,
    cards: Vec<CitationCard>,
    toc: Option<TocBuilder>,
}

impl Builder {
    fn element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        append_element(&mut self.dom, parent, tag, attrs)
    }

    fn text_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)], text: &str) {
        let id = self.element(parent, tag, attrs);
        self.dom.append_text(id, text);
    }

    fn block(&mut self, article: NodeId, block: &ContentBlock) {
        let section = self.element(
            article,
            "section",
            &[
                ("class", "content-block"),
                ("id", format!("block-{}", block.id).as_str()),
                ("data-block-type", block.block_type.as_str()),
            ],
        );

        let label = block.label().bilingual();
        match &block.commentary {
            Some(commentary) => {
                let heading = self.element(section, "div", &[("class", "commentary-heading")]);
                self.text_element(
                    heading,
                    "span",
                    &[
                        ("class", "commentary-name"),
                        (
                            "title",
                            format!("{}, {}", commentary.author, commentary.work_name).as_str(),
                        ),
                    ],
                    &commentary.short_name,
                );
                self.text_element(heading, "span", &[("class", "block-type-label")], &label);
            }
            None => {
                let heading = self.element(section, "div", &[("class", "block-heading")]);
                self.text_element(heading, "span", &[("class", "block-type-label")], &label);
            }
        }

        let class = format!("block-body font-devanagari {}", block.block_type);
        let body = self.element(section, "div", &[("class", class.trim_end())]);
        for node in parse_content(&block.sanskrit) {
            self.node(body, &node);
        }
    }

    fn node(&mut self, parent: NodeId, node: &ContentNode) {
        match node {
            ContentNode::Text(text) => self.dom.append_text(parent, text),
            ContentNode::Element(element) => self.content_element(parent, element),
            ContentNode::Footnote(note) => self.note_ref(parent, NoteKind::Footnote, &note.content),
            ContentNode::SpecialNote(note) => {
                self.note_ref(parent, NoteKind::SpecialNote, &note.content)
            }
            ContentNode::Citation(citation) => self.citation(parent, citation),
        }
    }

    fn content_element(&mut self, parent: NodeId, element: &ElementNode) {
        if element.tag == "script" {
            tracing::debug!("dropping script element from block content");
            return;
        }

        let attrs = element
            .attrs
            .iter()
            .filter(|(name, _)| !name.starts_with("on"))
            .map(|(name, value)| Attribute::new(name, value.clone()))
            .collect();
        let id = self.dom.create_html_element(&element.tag, attrs);
        self.dom.append(parent, id);

        for child in &element.children {
            self.node(id, child);
        }

        if let Some(toc) = self.toc.as_mut()
            && let Some(level) = heading_level(&element.tag)
        {
            let title = element.text();
            let anchor = toc.add(level, &title, self.dom.get_attr(id, "id"));
            self.dom.set_attr(id, "id", anchor);
        }
    }

    fn note_ref(&mut self, parent: NodeId, kind: NoteKind, content: &str) {
        let number = self.notes.register(kind, content);
        let sup = self.element(parent, "sup", &[("class", kind.ref_class())]);
        self.text_element(
            sup,
            "a",
            &[
                ("id", kind.ref_id(number).as_str()),
                ("href", format!("#{}", kind.note_id(number)).as_str()),
            ],
            &format!("[{number}]"),
        );
    }

    fn citation(&mut self, parent: NodeId, citation: &CitationRef) {
        let node = self.element(
            parent,
            "span",
            &[
                ("class", "citation-node"),
                ("data-citation-ref", citation.reference.as_str()),
                ("data-state", CitationState::Pending.as_str()),
            ],
        );
        self.text_element(node, "span", &[("class", "citation-label")], &citation.label);
        let body = self.element(
            node,
            "span",
            &[("class", "citation-card"), ("role", "tooltip")],
        );
        self.dom.append_text(body, PENDING_TEXT);

        self.cards.push(CitationCard {
            reference: citation.reference.clone(),
            label: citation.label.clone(),
            state: CitationState::Pending,
            node,
            body,
        });
    }

    fn note_list(&mut self, article: NodeId, kind: NoteKind) {
        let notes = self.notes.notes(kind).to_vec();
        if notes.is_empty() {
            return;
        }

        let section = self.element(article, "section", &[("class", kind.list_class())]);
        self.text_element(section, "div", &[("class", "notes-heading")], kind.heading());
        let list = self.element(section, "ol", &[]);
        for (i, content) in notes.iter().enumerate() {
            let number = i + 1;
            let item = self.element(list, "li", &[("id", kind.note_id(number).as_str())]);
            self.text_element(
                item,
                "span",
                &[("class", "note-content"), ("data-transliterate", "")],
                content,
            );
            self.dom.append_text(item, " ");
            self.text_element(
                item,
                "a",
                &[
                    ("class", "note-backref"),
                    ("href", format!("#{}", kind.ref_id(number)).as_str()),
                ],
                "↩",
            );
        }
    }

    fn toc_list(&mut self, nav: NodeId, entries: &[TocEntry]) {
        let list = self.element(nav, "ol", &[]);
        for entry in entries {
            let item = self.element(list, "li", &[("class", format!("toc-level-{}", entry.level).as_str())]);
            self.text_element(item, "a", &[("href", format!("#{}", entry.id).as_str())], &entry.title);
        }
    }
}

/// A rendered article.
#[derive(Debug)]
pub struct RenderedArticle {
    dom: Dom,
    root: NodeId,
    scope: String,
    citations: Vec<CitationCard>,
    notes: NoteRegistry,
    toc: Vec<TocEntry>,
}

impl RenderedArticle {
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// The `div.themed-document` container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn citations(&self) -> &[CitationCard] {
        &self.citations
    }

    pub fn footnotes(&self) -> &[String] {
        self.notes.notes(NoteKind::Footnote)
    }

    pub fn special_notes(&self) -> &[String] {
        self.notes.notes(NoteKind::SpecialNote)
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// HTML in the stored script.
    pub fn to_html(&self) -> String {
        serialize_node(&self.dom, self.root, &HashMap::new())
    }

    /// HTML with marked regions in the context's current script.
    pub fn to_html_in<S: PreferenceStore>(&self, ctx: &TransliterationContext<S>) -> String {
        let overrides = transliteration_overrides(&self.dom, self.root, ctx);
        serialize_node(&self.dom, self.root, &overrides)
    }

    /// A standalone page with the theme injected in the head.
    pub fn to_page<S: PreferenceStore>(
        &self,
        stylesheet: &ThemeStylesheet,
        ctx: &TransliterationContext<S>,
    ) -> String {
        if stylesheet.scope() != self.scope {
            tracing::warn!(
                article = %self.scope,
                stylesheet = %stylesheet.scope(),
                "stylesheet scope does not match article"
            );
        }
        format!(
            "<!DOCTYPE html>\n<html lang=\"sa\">\n<head>\n<meta charset=\"utf-8\">\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
            stylesheet.to_style_tag(),
            self.to_html_in(ctx)
        )
    }

    /// Show the card at `index`, fetching its details on first show.
    pub fn show_citation(
        &mut self,
        index: usize,
        lookup: &dyn CitationLookup,
    ) -> Option<&CitationState> {
        let card = self.citations.get_mut(index)?;
        if card.resolve(lookup) {
            paint_card(&mut self.dom, card);
        }
        Some(&card.state)
    }

    /// Show every card. Returns how many fetched.
    pub fn show_all_citations(&mut self, lookup: &dyn CitationLookup) -> usize {
        let mut fetched = 0;
        for card in &mut self.citations {
            if card.resolve(lookup) {
                paint_card(&mut self.dom, card);
                fetched += 1;
            }
        }
        fetched
    }
}

fn paint_card(dom: &mut Dom, card: &CitationCard) {
    let children: Vec<_> = dom.children(card.body).collect();
    for child in children {
        dom.detach(child);
    }
    dom.set_attr(card.node, "data-state", card.state.as_str());

    match &card.state {
        CitationState::Pending => dom.append_text(card.body, PENDING_TEXT),
        CitationState::Loaded(details) => {
            let source = append_element(dom, card.body, "span", &[("class", "citation-source")]);
            dom.append_text(source, &details.source);
            let location = append_element(dom, card.body, "span", &[("class", "citation-location")]);
            dom.append_text(location, &details.location);
        }
        CitationState::NotFound => dom.append_text(card.body, NOT_FOUND_TEXT),
        CitationState::Failed(_) => dom.append_text(card.body, FAILED_TEXT),
    }
}
