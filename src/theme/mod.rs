//! Per-book theme styles.
//!
//! A [`ThemeStyleModel`] maps each semantic element of a rendered article
//! (headings, sutra, bhashya, footnotes, ...) to a small set of CSS-like
//! properties. [`generate_css`] turns the model into a stylesheet scoped to
//! one rendering container.

mod css_gen;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use css_gen::{ThemeApplier, ThemeStylesheet, generate_css, is_safe_value};

/// Semantic element a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKey {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Paragraph,
    Sutra,
    Bhashya,
    Teeka,
    Citation,
    Quotation,
    Version,
    Footnote,
    SpecialNote,
    Toc,
}

impl ElementKey {
    pub const ALL: [ElementKey; 16] = [
        ElementKey::H1,
        ElementKey::H2,
        ElementKey::H3,
        ElementKey::H4,
        ElementKey::H5,
        ElementKey::H6,
        ElementKey::Paragraph,
        ElementKey::Sutra,
        ElementKey::Bhashya,
        ElementKey::Teeka,
        ElementKey::Citation,
        ElementKey::Quotation,
        ElementKey::Version,
        ElementKey::Footnote,
        ElementKey::SpecialNote,
        ElementKey::Toc,
    ];

    /// Selectors matching this element inside `.article-content`.
    pub fn selectors(self) -> &'static [&'static str] {
        match self {
            ElementKey::H1 => &["h1"],
            ElementKey::H2 => &["h2"],
            ElementKey::H3 => &["h3"],
            ElementKey::H4 => &["h4"],
            ElementKey::H5 => &["h5"],
            ElementKey::H6 => &["h6"],
            ElementKey::Paragraph => &["p", ".paragraph"],
            ElementKey::Sutra => &[".sutra"],
            ElementKey::Bhashya => &[".bhashya"],
            ElementKey::Teeka => &[".teeka"],
            ElementKey::Citation => &[".citation-node"],
            ElementKey::Quotation => &["blockquote", ".quotation"],
            ElementKey::Version => &[".version"],
            ElementKey::Footnote => &[".footnotes"],
            ElementKey::SpecialNote => &[".special-notes"],
            ElementKey::Toc => &[".toc"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKey::H1 => "h1",
            ElementKey::H2 => "h2",
            ElementKey::H3 => "h3",
            ElementKey::H4 => "h4",
            ElementKey::H5 => "h5",
            ElementKey::H6 => "h6",
            ElementKey::Paragraph => "paragraph",
            ElementKey::Sutra => "sutra",
            ElementKey::Bhashya => "bhashya",
            ElementKey::Teeka => "teeka",
            ElementKey::Citation => "citation",
            ElementKey::Quotation => "quotation",
            ElementKey::Version => "version",
            ElementKey::Footnote => "footnote",
            ElementKey::SpecialNote => "specialNote",
            ElementKey::Toc => "toc",
        }
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style properties for one element. `color` and `background_color` accept
/// gradient strings as well as solid colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl ElementStyle {
    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }

    pub fn font_size(mut self, value: &str) -> Self {
        self.font_size = Some(value.to_string());
        self
    }

    pub fn color(mut self, value: &str) -> Self {
        self.color = Some(value.to_string());
        self
    }

    pub fn font_weight(mut self, value: &str) -> Self {
        self.font_weight = Some(value.to_string());
        self
    }

    pub fn font_style(mut self, value: &str) -> Self {
        self.font_style = Some(value.to_string());
        self
    }

    pub fn font_family(mut self, value: &str) -> Self {
        self.font_family = Some(value.to_string());
        self
    }

    pub fn background_color(mut self, value: &str) -> Self {
        self.background_color = Some(value.to_string());
        self
    }
}

/// A book's theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyleModel {
    pub book_id: String,
    #[serde(default)]
    pub styles: BTreeMap<ElementKey, ElementStyle>,
}

impl ThemeStyleModel {
    /// An empty model: no element is styled.
    pub fn empty(book_id: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            styles: BTreeMap::new(),
        }
    }

    /// The built-in theme for a book.
    pub fn default_for(book_id: impl Into<String>) -> Self {
        let styles = [
            (ElementKey::H1, ElementStyle::default().font_size("2.25rem").font_weight("700").color("#1f2937")),
            (ElementKey::H2, ElementStyle::default().font_size("1.875rem").font_weight("700").color("#1f2937")),
            (ElementKey::H3, ElementStyle::default().font_size("1.5rem").font_weight("600").color("#1f2937")),
            (ElementKey::H4, ElementStyle::default().font_size("1.25rem").font_weight("600").color("#374151")),
            (ElementKey::H5, ElementStyle::default().font_size("1.125rem").font_weight("600").color("#374151")),
            (ElementKey::H6, ElementStyle::default().font_size("1rem").font_weight("600").color("#374151")),
            (ElementKey::Paragraph, ElementStyle::default().font_size("1rem").color("#111827")),
            (ElementKey::Sutra, ElementStyle::default().font_size("1.25rem").font_weight("600").color("#7c2d12")),
            (ElementKey::Bhashya, ElementStyle::default().font_size("1.05rem").color("#1f2937")),
            (ElementKey::Teeka, ElementStyle::default().font_size("1rem").font_style("italic").color("#374151")),
            (ElementKey::Citation, ElementStyle::default().color("#2563eb")),
            (ElementKey::Quotation, ElementStyle::default().font_style("italic").color("#4b5563")),
            (ElementKey::Version, ElementStyle::default().font_size("0.875rem").color("#6b7280")),
            (ElementKey::Footnote, ElementStyle::default().font_size("0.875rem").color("#4b5563")),
            (
                ElementKey::SpecialNote,
                ElementStyle::default().font_size("0.875rem").color("#92400e").background_color("#fffbeb"),
            ),
            (ElementKey::Toc, ElementStyle::default().font_size("0.95rem").color("#1f2937")),
        ];

        Self {
            book_id: book_id.into(),
            styles: styles.into_iter().collect(),
        }
    }

    /// Replace every style with the built-in defaults, keeping the book id.
    pub fn reset_to_default(&mut self) {
        *self = Self::default_for(std::mem::take(&mut self.book_id));
    }

    pub fn style(&self, key: ElementKey) -> Option<&ElementStyle> {
        self.styles.get(&key)
    }

    /// Set or clear (with an empty style) one element's style.
    pub fn set_style(&mut self, key: ElementKey, style: ElementStyle) {
        if style.is_empty() {
            self.styles.remove(&key);
        } else {
            self.styles.insert(key, style);
        }
    }
}
