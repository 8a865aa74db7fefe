//! Line-oriented text documents.
//!
//! A [`Document`] is the ordered list of lines produced by splitting raw text
//! on `'\n'`. Documents are never edited in place; every load replaces the
//! previous one wholesale.

use serde::{Deserialize, Serialize};

/// The lines of the most recently loaded text source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: Option<String>,
    lines: Vec<String>,
}

impl Document {
    /// The "nothing loaded" document.
    pub const fn empty() -> Self {
        Self {
            name: None,
            lines: Vec::new(),
        }
    }

    /// Split `raw` on `'\n'`, keeping empty embedded and trailing lines.
    ///
    /// `"a\n"` yields `["a", ""]` and `""` yields `[""]`, so any loaded
    /// source produces at least one line.
    pub fn from_text(name: impl Into<String>, raw: &str) -> Self {
        Self {
            name: Some(name.into()),
            lines: raw.split('\n').map(ToOwned::to_owned).collect(),
        }
    }

    /// Display name of the source (file name or path).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn line_at(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last line, or `None` for the empty document.
    pub fn last_index(&self) -> Option<usize> {
        self.lines.len().checked_sub(1)
    }

    /// Whether `index` addresses an existing line.
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_lines(doc: &Document) -> Vec<&str> {
        (0..doc.len()).filter_map(|i| doc.line_at(i)).collect()
    }

    #[test]
    fn test_from_text_splits_on_newline() {
        let doc = Document::from_text("a.txt", "a\nb\nc");
        assert_eq!(all_lines(&doc), ["a", "b", "c"]);
        assert_eq!(doc.name(), Some("a.txt"));
    }

    #[test]
    fn test_from_text_preserves_trailing_empty_line() {
        let doc = Document::from_text("a.txt", "a\n");
        assert_eq!(all_lines(&doc), ["a", ""]);
    }

    #[test]
    fn test_from_text_preserves_embedded_empty_lines() {
        let doc = Document::from_text("a.txt", "a\n\n\nb");
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.line_at(1), Some(""));
        assert_eq!(doc.line_at(3), Some("b"));
    }

    #[test]
    fn test_empty_text_yields_single_empty_line() {
        let doc = Document::from_text("blank.txt", "");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.line_at(0), Some(""));
    }

    #[test]
    fn test_carriage_returns_are_kept_verbatim() {
        let doc = Document::from_text("dos.txt", "a\r\nb");
        assert_eq!(doc.line_at(0), Some("a\r"));
    }

    #[test]
    fn test_empty_document_has_no_last_index() {
        let doc = Document::empty();
        assert!(doc.is_empty());
        assert_eq!(doc.last_index(), None);
        assert!(!doc.contains_index(0));
        assert_eq!(doc.name(), None);
    }
}
