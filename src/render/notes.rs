//! Footnote and special-note numbering.

/// The two independently numbered note series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    Footnote,
    SpecialNote,
}

impl NoteKind {
    fn prefix(self) -> &'static str {
        match self {
            NoteKind::Footnote => "footnote",
            NoteKind::SpecialNote => "specialnote",
        }
    }

    /// Id of the list entry, e.g. `footnote-3`.
    pub fn note_id(self, number: usize) -> String {
        format!("{}-{number}", self.prefix())
    }

    /// Id of the in-text anchor, e.g. `ref-footnote-3`.
    pub fn ref_id(self, number: usize) -> String {
        format!("ref-{}-{number}", self.prefix())
    }

    /// Class of the in-text `<sup>` marker.
    pub fn ref_class(self) -> &'static str {
        match self {
            NoteKind::Footnote => "footnote-ref",
            NoteKind::SpecialNote => "specialnote-ref",
        }
    }

    /// Class of the list section rendered after the blocks.
    pub fn list_class(self) -> &'static str {
        match self {
            NoteKind::Footnote => "footnotes",
            NoteKind::SpecialNote => "special-notes",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            NoteKind::Footnote => "Footnotes",
            NoteKind::SpecialNote => "Special notes",
        }
    }
}

/// Collects notes across a whole article, numbering each series from 1 in
/// the order markers are encountered.
#[derive(Debug, Default, Clone)]
pub struct NoteRegistry {
    footnotes: Vec<String>,
    special_notes: Vec<String>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a note and return its number. Identical content registered
    /// twice gets two numbers.
    pub fn register(&mut self, kind: NoteKind, content: &str) -> usize {
        let series = self.series_mut(kind);
        series.push(content.to_string());
        series.len()
    }

    pub fn notes(&self, kind: NoteKind) -> &[String] {
        match kind {
            NoteKind::Footnote => &self.footnotes,
            NoteKind::SpecialNote => &self.special_notes,
        }
    }

    fn series_mut(&mut self, kind: NoteKind) -> &mut Vec<String> {
        match kind {
            NoteKind::Footnote => &mut self.footnotes,
            NoteKind::SpecialNote => &mut self.special_notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_are_numbered_independently() {
        let mut notes = NoteRegistry::new();
        assert_eq!(notes.register(NoteKind::Footnote, "a"), 1);
        assert_eq!(notes.register(NoteKind::SpecialNote, "s"), 1);
        assert_eq!(notes.register(NoteKind::Footnote, "a"), 2);
        assert_eq!(notes.notes(NoteKind::Footnote), ["a", "a"]);
    }

    #[test]
    fn test_ids() {
        assert_eq!(NoteKind::Footnote.note_id(2), "footnote-2");
        assert_eq!(NoteKind::Footnote.ref_id(2), "ref-footnote-2");
        assert_eq!(NoteKind::SpecialNote.ref_id(1), "ref-specialnote-1");
    }
}
