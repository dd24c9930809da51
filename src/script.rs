//! Registry of supported scripts.
//!
//! Every conversion starts from Devanagari; any of these scripts can be the
//! target. The identifiers are the external contract for callers selecting a
//! script and for the persisted preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A script that text can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Script {
    Devanagari,
    Kannada,
    Telugu,
    Tamil,
    Malayalam,
    Gujarati,
    Bengali,
    Gurmukhi,
    Iast,
    Itrans,
    Hk,
    Slp1,
}

impl Script {
    /// All scripts, in registry order.
    pub const ALL: [Script; 12] = [
        Script::Devanagari,
        Script::Kannada,
        Script::Telugu,
        Script::Tamil,
        Script::Malayalam,
        Script::Gujarati,
        Script::Bengali,
        Script::Gurmukhi,
        Script::Iast,
        Script::Itrans,
        Script::Hk,
        Script::Slp1,
    ];

    /// The script every stored text is written in.
    pub const SOURCE: Script = Script::Devanagari;

    /// External identifier, e.g. `"DEVANAGARI"` or `"IAST"`.
    pub fn id(self) -> &'static str {
        match self {
            Script::Devanagari => "DEVANAGARI",
            Script::Kannada => "KANNADA",
            Script::Telugu => "TELUGU",
            Script::Tamil => "TAMIL",
            Script::Malayalam => "MALAYALAM",
            Script::Gujarati => "GUJARATI",
            Script::Bengali => "BENGALI",
            Script::Gurmukhi => "GURMUKHI",
            Script::Iast => "IAST",
            Script::Itrans => "ITRANS",
            Script::Hk => "HK",
            Script::Slp1 => "SLP1",
        }
    }

    /// Scheme name understood by the conversion backend.
    pub fn scheme(self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Kannada => "kannada",
            Script::Telugu => "telugu",
            Script::Tamil => "tamil",
            Script::Malayalam => "malayalam",
            Script::Gujarati => "gujarati",
            Script::Bengali => "bengali",
            Script::Gurmukhi => "gurmukhi",
            Script::Iast => "iast",
            Script::Itrans => "itrans",
            Script::Hk => "hk",
            Script::Slp1 => "slp1",
        }
    }

    /// Human-readable label for script pickers.
    pub fn label(self) -> &'static str {
        match self {
            Script::Devanagari => "देवनागरी",
            Script::Kannada => "ಕನ್ನಡ",
            Script::Telugu => "తెలుగు",
            Script::Tamil => "தமிழ்",
            Script::Malayalam => "മലയാളം",
            Script::Gujarati => "ગુજરાતી",
            Script::Bengali => "বাংলা",
            Script::Gurmukhi => "ਗੁਰਮੁਖੀ",
            Script::Iast => "IAST",
            Script::Itrans => "ITRANS",
            Script::Hk => "Harvard-Kyoto",
            Script::Slp1 => "SLP1",
        }
    }

    /// Latin-alphabet romanization schemes.
    pub fn is_roman(self) -> bool {
        matches!(self, Script::Iast | Script::Itrans | Script::Hk | Script::Slp1)
    }

    /// Exact, case-sensitive lookup by identifier.
    pub fn from_id(id: &str) -> Option<Script> {
        Script::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl Default for Script {
    fn default() -> Self {
        Script::SOURCE
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Script {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::from_id(s).ok_or_else(|| Error::UnknownScript(s.to_string()))
    }
}
