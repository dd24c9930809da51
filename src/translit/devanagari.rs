//! Devanagari code points shared by the conversion tables.

pub const CANDRABINDU: char = '\u{0901}';
pub const ANUSVARA: char = '\u{0902}';
pub const VISARGA: char = '\u{0903}';
pub const NUKTA: char = '\u{093C}';
pub const AVAGRAHA: char = '\u{093D}';
pub const VIRAMA: char = '\u{094D}';
pub const OM: char = '\u{0950}';
pub const DANDA: char = '\u{0964}';
pub const DOUBLE_DANDA: char = '\u{0965}';

/// Independent vowels, in table order. `अ` comes first so that index 0 is the
/// inherent vowel.
pub const VOWELS: [char; 14] = [
    'अ', 'आ', 'इ', 'ई', 'उ', 'ऊ', 'ऋ', 'ॠ', 'ऌ', 'ॡ', 'ए', 'ऐ', 'ओ', 'औ',
];

/// Dependent vowel signs. Entry `i` is the sign for `VOWELS[i + 1]`.
pub const VOWEL_SIGNS: [char; 13] = [
    'ा', 'ि', 'ी', 'ु', 'ू', 'ृ', 'ॄ', 'ॢ', 'ॣ', 'े', 'ै', 'ो', 'ौ',
];

/// Consonants, in table order.
pub const CONSONANTS: [char; 34] = [
    'क', 'ख', 'ग', 'घ', 'ङ', 'च', 'छ', 'ज', 'झ', 'ञ', 'ट', 'ठ', 'ड', 'ढ', 'ण', 'त', 'थ',
    'द', 'ध', 'न', 'प', 'फ', 'ब', 'भ', 'म', 'य', 'र', 'ल', 'ळ', 'व', 'श', 'ष', 'स', 'ह',
];

/// Consonants that take a nukta, in table order.
pub const NUKTA_BASES: [char; 8] = ['क', 'ख', 'ग', 'ज', 'ड', 'ढ', 'फ', 'य'];

/// Homorganic nasal and stop consonants per articulatory class, from velar
/// to labial.
pub const NASAL_CLASSES: [(char, [char; 4]); 5] = [
    ('ङ', ['क', 'ख', 'ग', 'घ']),
    ('ञ', ['च', 'छ', 'ज', 'झ']),
    ('ण', ['ट', 'ठ', 'ड', 'ढ']),
    ('न', ['त', 'थ', 'द', 'ध']),
    ('म', ['प', 'फ', 'ब', 'भ']),
];

pub fn vowel_index(c: char) -> Option<usize> {
    VOWELS.iter().position(|&v| v == c)
}

pub fn vowel_sign_index(c: char) -> Option<usize> {
    VOWEL_SIGNS.iter().position(|&v| v == c)
}

pub fn consonant_index(c: char) -> Option<usize> {
    CONSONANTS.iter().position(|&v| v == c)
}

pub fn nukta_index(c: char) -> Option<usize> {
    NUKTA_BASES.iter().position(|&v| v == c)
}

pub fn digit_value(c: char) -> Option<u32> {
    match c {
        '\u{0966}'..='\u{096F}' => Some(c as u32 - 0x0966),
        _ => None,
    }
}

/// Base consonant of a precomposed nukta letter.
pub fn nukta_base(c: char) -> Option<char> {
    let base = match c {
        '\u{0929}' => 'न',
        '\u{0931}' => 'र',
        '\u{0934}' => 'ळ',
        '\u{0958}' => 'क',
        '\u{0959}' => 'ख',
        '\u{095A}' => 'ग',
        '\u{095B}' => 'ज',
        '\u{095C}' => 'ड',
        '\u{095D}' => 'ढ',
        '\u{095E}' => 'फ',
        '\u{095F}' => 'य',
        _ => return None,
    };
    Some(base)
}

/// Split precomposed nukta letters into base consonant plus nukta so the
/// tables only need to know about the base letters.
pub fn decompose(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match nukta_base(c) {
            Some(base) => out.extend([base, NUKTA]),
            None => out.push(c),
        }
    }
    out
}
