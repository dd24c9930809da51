//! Heading anchors and the table of contents.

use std::collections::HashSet;

use crate::script::Script;
use crate::translit::transliterate;

/// One heading in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub title: String,
}

/// Generate a URL-safe slug from ASCII text.
///
/// ```
/// use lipi::render::slugify;
///
/// assert_eq!(slugify("kRSNa uvAca"), "krsna-uvaca");
/// assert_eq!(slugify("  Adhyaya 1, Part 2 "), "adhyaya-1-part-2");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Assigns unique heading ids in document order.
#[derive(Debug, Default)]
pub struct TocBuilder {
    taken: HashSet<String>,
    entries: Vec<TocEntry>,
}

impl TocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a heading and return the id it should carry. An id already
    /// present on the heading is kept.
    pub fn add(&mut self, level: u8, title: &str, existing_id: Option<&str>) -> String {
        let id = match existing_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                // Slugs come from the Harvard-Kyoto romanization, which is
                // plain ASCII.
                let base = slugify(&transliterate(title, Script::Hk));
                let base = if base.is_empty() {
                    format!("section-{}", self.entries.len() + 1)
                } else {
                    base
                };
                self.unique(base)
            }
        };

        self.taken.insert(id.clone());
        self.entries.push(TocEntry {
            level,
            id: id.clone(),
            title: title.trim().to_string(),
        });
        id
    }

    fn unique(&self, base: String) -> String {
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        candidate
    }

    pub fn into_entries(self) -> Vec<TocEntry> {
        self.entries
    }
}

/// Heading level for `h1`..`h6`.
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("--a__b--"), "a-b");
        assert_eq!(slugify("॥"), "");
    }

    #[test]
    fn test_devanagari_headings_slug_from_romanization() {
        let mut toc = TocBuilder::new();
        assert_eq!(toc.add(2, "योगः", None), "yogah");
    }

    #[test]
    fn test_duplicates_and_fallbacks() {
        let mut toc = TocBuilder::new();
        assert_eq!(toc.add(2, "Intro", None), "intro");
        assert_eq!(toc.add(2, "Intro", None), "intro-2");
        assert_eq!(toc.add(3, "Intro", None), "intro-3");
        assert_eq!(toc.add(3, "॥", None), "section-4");
        assert_eq!(toc.add(3, "x", Some("custom")), "custom");

        let entries = toc.into_entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[3].title, "॥");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h3"), Some(3));
        assert_eq!(heading_level("header"), None);
    }
}
