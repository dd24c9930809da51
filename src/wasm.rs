//! WASM bindings for in-browser transliteration, theming and rendering.

use wasm_bindgen::prelude::*;

use crate::content::ContentBlock;
use crate::context::TransliterationContext;
use crate::prefs::MemoryStore;
use crate::render::ArticleRenderer;
use crate::theme::{ThemeStyleModel, generate_css};
use crate::translit::Transliterator;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Transliterate Devanagari text. Unknown script ids return the input.
#[wasm_bindgen]
pub fn transliterate(text: &str, script_id: &str) -> String {
    Transliterator::new()
        .transliterate_by_id(text, script_id)
        .into_owned()
}

/// Scoped theme CSS from a theme model JSON string.
#[wasm_bindgen]
pub fn theme_css(theme_json: &str, scope: &str, font_size: Option<String>) -> Result<String, JsValue> {
    let model: ThemeStyleModel = serde_json::from_str(theme_json).map_err(js_error)?;
    Ok(generate_css(&model, scope, font_size.as_deref())
        .css()
        .to_string())
}

/// The built-in theme model for a book, as JSON.
#[wasm_bindgen]
pub fn default_theme(book_id: &str) -> Result<String, JsValue> {
    serde_json::to_string(&ThemeStyleModel::default_for(book_id)).map_err(js_error)
}

/// Render a JSON array of content blocks to HTML in the given script.
#[wasm_bindgen]
pub fn render_article(blocks_json: &str, script_id: &str) -> Result<String, JsValue> {
    let blocks: Vec<ContentBlock> = serde_json::from_str(blocks_json).map_err(js_error)?;
    let article = ArticleRenderer::default().render(&blocks);

    let mut ctx = TransliterationContext::new(MemoryStore::new());
    ctx.hydrate();
    ctx.set_target_script(script_id);
    Ok(article.to_html_in(&ctx))
}
