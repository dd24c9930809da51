//! Content blocks as stored by the CMS, and their typed node trees.

mod node;

use serde::{Deserialize, Serialize};

pub use node::{CitationRef, ContentNode, ElementNode, Note, parse_content};

/// One unit of document content: a sutra, a commentary paragraph, a verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    /// HTML payload in Devanagari.
    pub sanskrit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<Commentary>,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, sanskrit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            sanskrit: sanskrit.into(),
            commentary: None,
        }
    }

    pub fn with_commentary(mut self, commentary: Commentary) -> Self {
        self.commentary = Some(commentary);
        self
    }

    pub fn label(&self) -> BlockLabel {
        BlockLabel::for_type(&self.block_type)
    }
}

/// Who wrote a commentary block, and in which work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub work_name: String,
    pub short_name: String,
}

/// Bilingual label for a block's semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLabel {
    pub iast: String,
    pub devanagari: Option<&'static str>,
}

impl BlockLabel {
    pub fn for_type(block_type: &str) -> Self {
        let known = match block_type {
            "sutra" => Some(("sūtram", "सूत्रम्")),
            "bhashya" => Some(("bhāṣyam", "भाष्यम्")),
            "teeka" => Some(("ṭīkā", "टीका")),
            "shloka" => Some(("ślokaḥ", "श्लोकः")),
            "vartika" => Some(("vārtikam", "वार्तिकम्")),
            "karika" => Some(("kārikā", "कारिका")),
            "mantra" => Some(("mantraḥ", "मन्त्रः")),
            "prose" => Some(("gadyam", "गद्यम्")),
            "heading" => Some(("śīrṣakam", "शीर्षकम्")),
            _ => None,
        };
        match known {
            Some((iast, devanagari)) => Self {
                iast: iast.to_string(),
                devanagari: Some(devanagari),
            },
            None => Self {
                iast: block_type.to_string(),
                devanagari: None,
            },
        }
    }

    /// `"sūtram / सूत्रम्"`, or just the IAST name for unknown types.
    pub fn bilingual(&self) -> String {
        match self.devanagari {
            Some(native) => format!("{} / {}", self.iast, native),
            None => self.iast.clone(),
        }
    }
}
