//! Devanagari to other Brahmic scripts.
//!
//! The Indic Unicode blocks share the ISCII layout, so most letters map by a
//! fixed block offset. Letters a target script does not encode go through a
//! per-script fallback table.

use crate::script::Script;

use super::devanagari::{self, NUKTA, OM};

/// Distance from the Devanagari block to the target block.
pub(super) fn block_offset(script: Script) -> Option<u32> {
    match script {
        Script::Bengali => Some(0x080),
        Script::Gurmukhi => Some(0x100),
        Script::Gujarati => Some(0x180),
        Script::Tamil => Some(0x280),
        Script::Telugu => Some(0x300),
        Script::Kannada => Some(0x380),
        Script::Malayalam => Some(0x400),
        _ => None,
    }
}

/// Shift a Devanagari letter into the target block.
pub(super) fn shift(c: char, offset: u32) -> char {
    char::from_u32(c as u32 + offset).unwrap_or(c)
}

/// Devanagari code points that have a counterpart at the same offset in
/// every target block, unless the fallback table says otherwise.
fn has_block_counterpart(c: char) -> bool {
    matches!(
        c,
        '\u{0901}'..='\u{0903}'
            | '\u{0905}'..='\u{090C}'
            | '\u{090F}'..='\u{0910}'
            | '\u{0913}'..='\u{0928}'
            | '\u{092A}'..='\u{0930}'
            | '\u{0932}'..='\u{0933}'
            | '\u{0935}'..='\u{0939}'
            | '\u{093C}'..='\u{0944}'
            | '\u{0947}'..='\u{0948}'
            | '\u{094B}'..='\u{094D}'
            | '\u{0950}'
            | '\u{0960}'..='\u{0963}'
            | '\u{0966}'..='\u{096F}'
    )
}

/// ऩ ऱ ऴ are separate letters in the southern scripts, encoded at the
/// usual offset where the block has them.
fn encodes_directly(script: Script, c: char) -> bool {
    matches!(
        (script, c),
        (Script::Tamil | Script::Malayalam, '\u{0929}' | '\u{0931}' | '\u{0934}')
            | (Script::Telugu, '\u{0931}' | '\u{0934}')
            | (Script::Kannada, '\u{0931}')
    )
}

/// Replacement for letters the target script has no code point for.
///
/// An empty string drops the character.
fn fallback(script: Script, c: char) -> Option<&'static str> {
    let text = match (script, c) {
        (Script::Bengali, 'व') => "ব",
        (Script::Bengali, 'ळ') => "ল",
        (Script::Bengali, OM) => "ওঁ",

        (Script::Gurmukhi, 'ऋ') => "ਰਿ",
        (Script::Gurmukhi, 'ॠ') => "ਰੀ",
        (Script::Gurmukhi, 'ऌ') => "ਲ੍ਰਿ",
        (Script::Gurmukhi, 'ॡ') => "ਲ੍ਰੀ",
        (Script::Gurmukhi, 'ृ') => "੍ਰਿ",
        (Script::Gurmukhi, 'ॄ') => "੍ਰੀ",
        (Script::Gurmukhi, 'ॢ') => "੍ਲ੍ਰਿ",
        (Script::Gurmukhi, 'ॣ') => "੍ਲ੍ਰੀ",
        (Script::Gurmukhi, 'ष') => "\u{0A36}",
        (Script::Gurmukhi, 'ऽ') => "ऽ",
        (Script::Gurmukhi, OM) => "ੴ",

        (Script::Tamil, 'ख' | 'ग' | 'घ') => "க",
        (Script::Tamil, 'छ') => "ச",
        (Script::Tamil, 'झ') => "ஜ",
        (Script::Tamil, 'ठ' | 'ड' | 'ढ') => "ட",
        (Script::Tamil, 'थ' | 'द' | 'ध') => "த",
        (Script::Tamil, 'फ' | 'ब' | 'भ') => "ப",
        (Script::Tamil, 'ऋ') => "ரு",
        (Script::Tamil, 'ॠ') => "ரூ",
        (Script::Tamil, 'ऌ') => "லு",
        (Script::Tamil, 'ॡ') => "லூ",
        (Script::Tamil, 'ृ') => "்ரு",
        (Script::Tamil, 'ॄ') => "்ரூ",
        (Script::Tamil, 'ॢ') => "்லு",
        (Script::Tamil, 'ॣ') => "்லூ",
        (Script::Tamil, 'ँ') => "ஂ",
        (Script::Tamil, 'ऽ') => "ऽ",
        (Script::Tamil, NUKTA) => "",

        (Script::Telugu, NUKTA) => "",
        (Script::Telugu, '\u{0929}') => "న",
        (Script::Telugu, OM) => "ఓం",

        (Script::Kannada, '\u{0929}') => "ನ",
        (Script::Kannada, '\u{0934}') => "\u{0CDE}",
        (Script::Kannada, OM) => "ಓಂ",

        (Script::Malayalam, NUKTA) => "",
        (Script::Malayalam, OM) => "ഓം",

        _ => return None,
    };
    Some(text)
}

/// Convert Devanagari text to a Brahmic script.
///
/// Characters outside the Devanagari letter inventory (Latin text,
/// punctuation, dandas, which all scripts share) are copied through.
pub(super) fn convert(text: &str, target: Script) -> String {
    let Some(offset) = block_offset(target) else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match devanagari::nukta_base(c) {
            Some(base) if fallback(target, c).is_none() && !encodes_directly(target, c) => {
                push_letter(&mut out, base, target, offset);
                push_letter(&mut out, NUKTA, target, offset);
            }
            _ => push_letter(&mut out, c, target, offset),
        }
    }
    out
}

fn push_letter(out: &mut String, c: char, target: Script, offset: u32) {
    if let Some(replacement) = fallback(target, c) {
        out.push_str(replacement);
    } else if has_block_counterpart(c) || encodes_directly(target, c) {
        out.push(shift(c, offset));
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kannada_offset() {
        assert_eq!(
            convert("नमस्ते", Script::Kannada),
            "\u{0CA8}\u{0CAE}\u{0CB8}\u{0CCD}\u{0CA4}\u{0CC7}"
        );
    }

    #[test]
    fn test_telugu_om() {
        assert_eq!(convert("ॐ", Script::Telugu), "ఓం");
    }

    #[test]
    fn test_tamil_collapses_aspirates() {
        assert_eq!(convert("भ", Script::Tamil), "ப");
        assert_eq!(convert("धर्म", Script::Tamil), "தர்ம");
    }

    #[test]
    fn test_bengali_va() {
        assert_eq!(convert("वेद", Script::Bengali), "বেদ");
    }

    #[test]
    fn test_gurmukhi_vocalic_r() {
        assert_eq!(
            convert("कृष्ण", Script::Gurmukhi),
            "\u{0A15}\u{0A4D}\u{0A30}\u{0A3F}\u{0A36}\u{0A4D}\u{0A23}"
        );
    }

    #[test]
    fn test_shared_punctuation_passes_through() {
        assert_eq!(convert("॥ १ ॥", Script::Gujarati), "॥ ૧ ॥");
    }

    #[test]
    fn test_nukta_decomposed() {
        assert_eq!(convert("\u{095B}", Script::Gujarati), "જ઼");
        assert_eq!(convert("\u{095B}", Script::Malayalam), "ജ");
    }

    #[test]
    fn test_southern_letters_are_not_split() {
        assert_eq!(convert("\u{0934}", Script::Tamil), "\u{0BB4}");
        assert_eq!(convert("\u{0929}", Script::Tamil), "\u{0BA9}");
        assert_eq!(convert("\u{0931}", Script::Kannada), "\u{0CB1}");
        assert_eq!(convert("\u{0934}", Script::Malayalam), "\u{0D34}");
        assert_eq!(convert("\u{0931}", Script::Telugu), "\u{0C31}");
    }

    #[test]
    fn test_southern_letters_missing_from_block() {
        assert_eq!(convert("\u{0934}", Script::Kannada), "\u{0CDE}");
        assert_eq!(convert("\u{0929}", Script::Telugu), "\u{0C28}");
        // Scripts without the letter keep base plus nukta.
        assert_eq!(convert("\u{0931}", Script::Gujarati), "\u{0AB0}\u{0ABC}");
    }
}
