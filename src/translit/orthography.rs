//! Orthographic fix-ups applied after conversion.
//!
//! In several Brahmic scripts a nasal consonant with virama before a stop of
//! the same articulatory class is conventionally written as an anusvara:
//! Kannada `ಶಙ್ಕರ` becomes `ಶಂಕರ`. The rules are compiled once on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::script::Script;

use super::brahmic::{block_offset, shift};
use super::devanagari::{ANUSVARA, NASAL_CLASSES, VIRAMA};

/// Scripts that write homorganic nasals as anusvara.
pub const ANUSVARA_SCRIPTS: [Script; 7] = [
    Script::Kannada,
    Script::Telugu,
    Script::Gujarati,
    Script::Bengali,
    Script::Gurmukhi,
    Script::Malayalam,
    Script::Tamil,
];

/// A single regex substitution.
#[derive(Debug)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

static RULES: LazyLock<HashMap<Script, Vec<Rule>>> = LazyLock::new(|| {
    ANUSVARA_SCRIPTS
        .into_iter()
        .filter_map(|script| Some((script, anusvara_rules(script, block_offset(script)?))))
        .collect()
});

/// Build the velar-to-labial rule list for one script.
fn anusvara_rules(script: Script, offset: u32) -> Vec<Rule> {
    let virama = shift(VIRAMA, offset);
    let anusvara = shift(ANUSVARA, offset);

    NASAL_CLASSES
        .iter()
        .map(|(nasal, stops)| {
            let class: String = stops.iter().map(|&c| shift(c, offset)).collect();
            let pattern = format!("{}{}([{}])", shift(*nasal, offset), virama, class);
            tracing::trace!(%script, %pattern, "compiled anusvara rule");
            Rule {
                pattern: Regex::new(&pattern).unwrap(),
                replacement: format!("{anusvara}${{1}}"),
            }
        })
        .collect()
}

/// The ordered rules for a script; empty for scripts without fix-ups.
pub fn rules(script: Script) -> &'static [Rule] {
    RULES.get(&script).map(Vec::as_slice).unwrap_or(&[])
}

/// Apply the script's rules in order.
pub fn apply(script: Script, mut text: String) -> String {
    for rule in rules(script) {
        let replaced = match rule.pattern.replace_all(&text, rule.replacement.as_str()) {
            std::borrow::Cow::Borrowed(_) => None,
            std::borrow::Cow::Owned(s) => Some(s),
        };
        if let Some(s) = replaced {
            text = s;
        }
    }
    text
}
