//! # lipi
//!
//! Publishing tools for Sanskrit texts stored in Devanagari.
//!
//! ## Features
//!
//! - Transliterate Devanagari into seven Indic scripts and four romanizations
//! - Keep a reader's script choice in a [`TransliterationContext`] backed by a
//!   [`PreferenceStore`]
//! - Render stored content blocks into a themed article with footnotes,
//!   special notes, citation cards and a table of contents
//! - Generate scoped theme CSS from a per-book [`ThemeStyleModel`]
//!
//! ## Quick Start
//!
//! ```
//! use lipi::{Script, transliterate};
//!
//! assert_eq!(transliterate("नमस्ते", Script::Iast), "namaste");
//! assert_eq!(transliterate("नमस्ते", Script::Devanagari), "नमस्ते");
//! ```
//!
//! ## Rendering an article
//!
//! ```
//! use lipi::{ArticleRenderer, ContentBlock, ThemeStyleModel, TransliterationContext, generate_css};
//!
//! let blocks = vec![ContentBlock::new("1", "sutra", "<p>अथ योगानुशासनम्</p>")];
//! let article = ArticleRenderer::new("reader").render(&blocks);
//!
//! let mut ctx = TransliterationContext::default();
//! ctx.hydrate();
//! ctx.set_target_script("IAST");
//! assert!(article.to_html_in(&ctx).contains("atha yogānuśāsanam"));
//!
//! let theme = generate_css(&ThemeStyleModel::default_for("ys"), "reader", None);
//! let page = article.to_page(&theme, &ctx);
//! assert!(page.contains("#reader .article-content"));
//! ```

pub mod content;
pub mod context;
pub mod dom;
pub mod error;
pub mod prefs;
pub mod render;
pub mod script;
pub mod theme;
pub mod translit;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use content::{Commentary, ContentBlock};
pub use context::{STORAGE_KEY, SubscriptionId, TransliterationContext};
pub use error::{Error, Result};
pub use prefs::{FileStore, MemoryStore, PreferenceStore};
pub use render::{ArticleRenderer, CitationIndex, CitationLookup, RenderedArticle};
pub use script::Script;
pub use theme::{ElementKey, ElementStyle, ThemeApplier, ThemeStyleModel, ThemeStylesheet, generate_css};
pub use translit::{Transliterator, transliterate};
