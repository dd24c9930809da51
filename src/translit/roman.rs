//! Devanagari to Latin-alphabet romanization schemes.
//!
//! Consonants carry an inherent `a` that is only written once we know the
//! next character: a vowel sign replaces it, a virama removes it, anything
//! else lets it through.

use crate::script::Script;

use super::devanagari::{
    self, ANUSVARA, AVAGRAHA, CANDRABINDU, DANDA, DOUBLE_DANDA, NUKTA, OM, VIRAMA, VISARGA,
};

/// Output strings for one romanization scheme, indexed like the tables in
/// [`devanagari`].
struct RomanTable {
    vowels: [&'static str; 14],
    consonants: [&'static str; 34],
    /// Nukta forms of `NUKTA_BASES`; empty means "use the base consonant".
    nukta: [&'static str; 8],
    anusvara: &'static str,
    visarga: &'static str,
    candrabindu: &'static str,
    avagraha: &'static str,
    om: &'static str,
    danda: &'static str,
    double_danda: &'static str,
}

static IAST: RomanTable = RomanTable {
    vowels: [
        "a", "ā", "i", "ī", "u", "ū", "ṛ", "ṝ", "ḷ", "ḹ", "e", "ai", "o", "au",
    ],
    consonants: [
        "k", "kh", "g", "gh", "ṅ", "c", "ch", "j", "jh", "ñ", "ṭ", "ṭh", "ḍ", "ḍh", "ṇ", "t", "th",
        "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r", "l", "ḻ", "v", "ś", "ṣ", "s", "h",
    ],
    nukta: ["q", "k͟h", "ġ", "z", "ṛ", "ṛh", "f", "ẏ"],
    anusvara: "ṃ",
    visarga: "ḥ",
    candrabindu: "m̐",
    avagraha: "'",
    om: "oṃ",
    danda: "।",
    double_danda: "॥",
};

static ITRANS: RomanTable = RomanTable {
    vowels: [
        "a", "A", "i", "I", "u", "U", "RRi", "RRI", "LLi", "LLI", "e", "ai", "o", "au",
    ],
    consonants: [
        "k", "kh", "g", "gh", "~N", "ch", "Ch", "j", "jh", "~n", "T", "Th", "D", "Dh", "N", "t",
        "th", "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r", "l", "L", "v", "sh", "Sh", "s",
        "h",
    ],
    nukta: ["q", "K", "G", "z", ".D", ".Dh", "f", "Y"],
    anusvara: "M",
    visarga: "H",
    candrabindu: ".N",
    avagraha: ".a",
    om: "OM",
    danda: "|",
    double_danda: "||",
};

static HK: RomanTable = RomanTable {
    vowels: [
        "a", "A", "i", "I", "u", "U", "R", "RR", "lR", "lRR", "e", "ai", "o", "au",
    ],
    consonants: [
        "k", "kh", "g", "gh", "G", "c", "ch", "j", "jh", "J", "T", "Th", "D", "Dh", "N", "t", "th",
        "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r", "l", "L", "v", "z", "S", "s", "h",
    ],
    nukta: ["", "", "", "", "", "", "", ""],
    anusvara: "M",
    visarga: "H",
    candrabindu: "~",
    avagraha: "'",
    om: "OM",
    danda: "|",
    double_danda: "||",
};

static SLP1: RomanTable = RomanTable {
    vowels: [
        "a", "A", "i", "I", "u", "U", "f", "F", "x", "X", "e", "E", "o", "O",
    ],
    consonants: [
        "k", "K", "g", "G", "N", "c", "C", "j", "J", "Y", "w", "W", "q", "Q", "R", "t", "T", "d",
        "D", "n", "p", "P", "b", "B", "m", "y", "r", "l", "L", "v", "S", "z", "s", "h",
    ],
    nukta: ["", "", "", "", "", "", "", ""],
    anusvara: "M",
    visarga: "H",
    candrabindu: "~",
    avagraha: "'",
    om: "oM",
    danda: ".",
    double_danda: "..",
};

fn table(script: Script) -> Option<&'static RomanTable> {
    match script {
        Script::Iast => Some(&IAST),
        Script::Itrans => Some(&ITRANS),
        Script::Hk => Some(&HK),
        Script::Slp1 => Some(&SLP1),
        _ => None,
    }
}

/// Convert Devanagari text to a romanization scheme.
pub(super) fn convert(text: &str, target: Script) -> String {
    let Some(table) = table(target) else {
        return text.to_string();
    };

    let chars = devanagari::decompose(text);
    let mut out = String::with_capacity(text.len() * 2);
    let mut inherent_a = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if let Some(index) = devanagari::consonant_index(c) {
            if inherent_a {
                out.push_str(table.vowels[0]);
            }
            let nukta_form = if chars.get(i) == Some(&NUKTA) {
                i += 1;
                devanagari::nukta_index(c)
                    .map(|n| table.nukta[n])
                    .filter(|s| !s.is_empty())
            } else {
                None
            };
            out.push_str(nukta_form.unwrap_or(table.consonants[index]));
            inherent_a = true;
            continue;
        }

        if let Some(index) = devanagari::vowel_sign_index(c) {
            out.push_str(table.vowels[index + 1]);
            inherent_a = false;
            continue;
        }

        if c == VIRAMA {
            inherent_a = false;
            continue;
        }

        if c == NUKTA {
            // Stray nukta with no consonant before it.
            continue;
        }

        if inherent_a {
            out.push_str(table.vowels[0]);
            inherent_a = false;
        }

        if let Some(index) = devanagari::vowel_index(c) {
            out.push_str(table.vowels[index]);
        } else if let Some(digit) = devanagari::digit_value(c) {
            out.push(char::from_digit(digit, 10).unwrap_or(c));
        } else {
            match c {
                ANUSVARA => out.push_str(table.anusvara),
                VISARGA => out.push_str(table.visarga),
                CANDRABINDU => out.push_str(table.candrabindu),
                AVAGRAHA => out.push_str(table.avagraha),
                OM => out.push_str(table.om),
                DANDA => out.push_str(table.danda),
                DOUBLE_DANDA => out.push_str(table.double_danda),
                _ => out.push(c),
            }
        }
    }

    if inherent_a {
        out.push_str(table.vowels[0]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iast_inherent_vowel() {
        assert_eq!(convert("नमस्ते", Script::Iast), "namaste");
        assert_eq!(convert("राम", Script::Iast), "rāma");
    }

    #[test]
    fn test_iast_marks() {
        assert_eq!(convert("नमः", Script::Iast), "namaḥ");
        assert_eq!(convert("संस्कृतम्", Script::Iast), "saṃskṛtam");
        assert_eq!(convert("सोऽहम्", Script::Iast), "so'ham");
    }

    #[test]
    fn test_independent_vowels() {
        assert_eq!(convert("ऋषि", Script::Iast), "ṛṣi");
        assert_eq!(convert("औषधम्", Script::Slp1), "OzaDam");
    }

    #[test]
    fn test_harvard_kyoto() {
        assert_eq!(convert("कृष्णः", Script::Hk), "kRSNaH");
    }

    #[test]
    fn test_itrans() {
        assert_eq!(convert("शिवः", Script::Itrans), "shivaH");
    }

    #[test]
    fn test_digits_and_dandas() {
        assert_eq!(convert("॥ १२ ॥", Script::Itrans), "|| 12 ||");
        assert_eq!(convert("।", Script::Slp1), ".");
    }

    #[test]
    fn test_nukta_consonant() {
        assert_eq!(convert("\u{095B}", Script::Iast), "za");
        assert_eq!(convert("\u{095B}", Script::Hk), "ja");
    }

    #[test]
    fn test_latin_passes_through() {
        assert_eq!(convert("chapter 1", Script::Iast), "chapter 1");
        assert_eq!(convert("राम and", Script::Iast), "rāma and");
    }
}
