//! Scoped CSS generation from a [`ThemeStyleModel`].
//!
//! Every rule is prefixed with `#<scope> .article-content` so a theme only
//! reaches the article it was generated for, and every declaration carries
//! `!important` to win over the base stylesheet.

use std::fmt::Write;

use cssparser::{ParseError, Parser, ParserInput, Token, serialize_identifier};

use super::{ElementKey, ElementStyle, ThemeStyleModel};
use crate::dom::escape_attr;

type CssParseError<'i> = ParseError<'i, ()>;

/// Generated stylesheet for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStylesheet {
    scope: String,
    css: String,
}

impl ThemeStylesheet {
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn is_empty(&self) -> bool {
        self.css.is_empty()
    }

    /// The stylesheet as a single `<style>` element.
    pub fn to_style_tag(&self) -> String {
        format!(
            "<style data-theme-scope=\"{}\">\n{}</style>",
            escape_attr(&self.scope),
            self.css
        )
    }
}

/// Generate the stylesheet for a model.
///
/// `font_size_override` replaces the paragraph font size only; headings and
/// the other elements keep their own sizes.
pub fn generate_css(
    model: &ThemeStyleModel,
    scope: &str,
    font_size_override: Option<&str>,
) -> ThemeStylesheet {
    let mut scope_selector = String::from("#");
    // Escaping keeps arbitrary ids inside the selector.
    serialize_identifier(scope, &mut scope_selector).unwrap();

    let mut css = String::new();
    for key in ElementKey::ALL {
        let mut style = model.style(key).cloned().unwrap_or_default();
        if key == ElementKey::Paragraph
            && let Some(size) = font_size_override
        {
            style.font_size = Some(size.to_string());
        }

        let declarations = declarations(key, &style);
        if declarations.is_empty() {
            continue;
        }

        let selector = key
            .selectors()
            .iter()
            .map(|s| format!("{scope_selector} .article-content {s}"))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(css, "{selector} {{").unwrap();
        for (property, value) in declarations {
            writeln!(css, "  {property}: {value} !important;").unwrap();
        }
        css.push_str("}\n");
    }

    ThemeStylesheet {
        scope: scope.to_string(),
        css,
    }
}

fn is_gradient(value: &str) -> bool {
    value.contains("gradient")
}

fn declarations(key: ElementKey, style: &ElementStyle) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();
    let mut push = |property: &'static str, value: &str| {
        if is_safe_value(value) {
            out.push((property, value.trim().to_string()));
        } else {
            tracing::warn!(element = %key, property, value, "dropping unsafe css value");
        }
    };

    if let Some(size) = &style.font_size {
        push("font-size", size);
    }

    let mut text_gradient = false;
    if let Some(color) = &style.color {
        if is_gradient(color) {
            text_gradient = true;
            push("background-image", color);
            push("-webkit-background-clip", "text");
            push("background-clip", "text");
            push("-webkit-text-fill-color", "transparent");
            push("color", "transparent");
        } else {
            push("color", color);
        }
    }

    if let Some(weight) = &style.font_weight {
        push("font-weight", weight);
    }
    if let Some(font_style) = &style.font_style {
        push("font-style", font_style);
    }
    if let Some(family) = &style.font_family {
        push("font-family", family);
    }

    if let Some(background) = &style.background_color {
        if !is_gradient(background) {
            push("background-color", background);
        } else if text_gradient {
            // The text gradient already occupies background-image.
            tracing::debug!(element = %key, "ignoring background gradient under gradient text");
        } else {
            push("background-image", background);
        }
    }

    out
}

/// True if `value` can sit inside a declaration without ending it.
///
/// Rejects empty values, anything containing `<`, values left open at the
/// end, and values whose tokens include `;`, braces or bad strings and urls,
/// at any nesting depth.
pub fn is_safe_value(value: &str) -> bool {
    if value.trim().is_empty() || value.contains('<') || !is_closed(value) {
        return false;
    }
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    tokens_are_safe(&mut parser)
}

fn tokens_are_safe(parser: &mut Parser) -> bool {
    while let Ok(token) = parser.next_including_whitespace_and_comments() {
        match token {
            Token::Semicolon
            | Token::CurlyBracketBlock
            | Token::CloseCurlyBracket
            | Token::BadString(_)
            | Token::BadUrl(_)
            | Token::CDO
            | Token::CDC => return false,
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let nested =
                    parser.parse_nested_block(|p| Ok::<_, CssParseError>(tokens_are_safe(p)));
                if !nested.unwrap_or(false) {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

/// True if every string, comment and bracket opened in `value` is closed.
///
/// The tokenizer accepts all of these at end of input, but inside a
/// stylesheet they swallow the rules that follow.
fn is_closed(value: &str) -> bool {
    let mut closers = Vec::new();
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' | '\'' => loop {
                match chars.next() {
                    Some('\\') => {
                        chars.next();
                    }
                    Some(q) if q == c => break,
                    Some(_) => {}
                    None => return false,
                }
            },
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut star = false;
                loop {
                    match chars.next() {
                        Some('/') if star => break,
                        Some(next) => star = next == '*',
                        None => return false,
                    }
                }
            }
            '(' => closers.push(')'),
            '[' => closers.push(']'),
            ')' | ']' => {
                if closers.pop() != Some(c) {
                    return false;
                }
            }
            _ => {}
        }
    }
    closers.is_empty()
}

/// Keeps a theme and its generated stylesheet in sync.
///
/// Each mutation regenerates the stylesheet, so [`ThemeApplier::stylesheet`]
/// always reflects the current model and font size.
#[derive(Debug, Clone)]
pub struct ThemeApplier {
    model: ThemeStyleModel,
    scope: String,
    font_size: Option<String>,
    stylesheet: ThemeStylesheet,
}

impl ThemeApplier {
    pub fn new(model: ThemeStyleModel, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        let stylesheet = generate_css(&model, &scope, None);
        Self {
            model,
            scope,
            font_size: None,
            stylesheet,
        }
    }

    pub fn model(&self) -> &ThemeStyleModel {
        &self.model
    }

    pub fn stylesheet(&self) -> &ThemeStylesheet {
        &self.stylesheet
    }

    pub fn font_size(&self) -> Option<&str> {
        self.font_size.as_deref()
    }

    pub fn set_style(&mut self, key: ElementKey, style: ElementStyle) {
        self.model.set_style(key, style);
        self.refresh();
    }

    /// Set or clear the reader's paragraph font size.
    pub fn set_font_size(&mut self, size: Option<&str>) {
        self.font_size = size.map(str::to_string);
        self.refresh();
    }

    pub fn replace_model(&mut self, model: ThemeStyleModel) {
        self.model = model;
        self.refresh();
    }

    pub fn reset_to_default(&mut self) {
        self.model.reset_to_default();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.stylesheet = generate_css(&self.model, &self.scope, self.font_size.as_deref());
        tracing::debug!(scope = %self.scope, bytes = self.stylesheet.css.len(), "theme regenerated");
    }
}
