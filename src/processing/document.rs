//! Document structures shared by the comparison pipeline

use serde::{Deserialize, Serialize};

/// Extracted text of one input file, pages joined by `\n`.
///
/// Pages without extractable text are skipped rather than kept as blanks,
/// so `page_count` only counts pages that contributed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    page_count: usize,
    skipped_pages: usize,
}

impl Document {
    /// Collapse page texts into one document, omitting empty pages
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        let mut skipped_pages = 0;

        for page in pages {
            let page = page.as_ref().trim();
            if page.is_empty() {
                skipped_pages += 1;
            } else {
                kept.push(page.to_string());
            }
        }

        Self {
            page_count: kept.len(),
            text: kept.join("\n"),
            skipped_pages,
        }
    }

    /// Single-page document, used for plain text and markdown inputs
    pub fn from_text(text: impl AsRef<str>) -> Self {
        Self::from_pages(std::iter::once(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn skipped_pages(&self) -> usize {
        self.skipped_pages
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text restricted to the Latin-1 range, produced only by the sanitizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedText {
    text: String,
    dropped_chars: usize,
}

impl SanitizedText {
    pub(crate) fn new(text: String, dropped_chars: usize) -> Self {
        Self { text, dropped_chars }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Characters removed because they had no Latin-1 representation
    pub fn dropped_chars(&self) -> usize {
        self.dropped_chars
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// First `max_chars` characters, cut on a char boundary
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }
}

impl AsRef<str> for SanitizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_joined_with_newlines() {
        let doc = Document::from_pages(vec!["First page", "Second page"]);
        assert_eq!(doc.text(), "First page\nSecond page");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.skipped_pages(), 0);
    }

    #[test]
    fn test_empty_pages_are_skipped() {
        let doc = Document::from_pages(vec!["", "Skills: Rust", "  \n ", "Education"]);
        assert_eq!(doc.text(), "Skills: Rust\nEducation");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.skipped_pages(), 2);
    }

    #[test]
    fn test_document_without_text() {
        let doc = Document::from_pages(Vec::<String>::new());
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = SanitizedText::new("caf\u{e9} au lait".to_string(), 0);
        assert_eq!(text.preview(4), "caf\u{e9}");
        assert_eq!(text.preview(100), "caf\u{e9} au lait");
    }

    #[test]
    fn test_char_count_is_not_byte_length() {
        let text = SanitizedText::new("na\u{ef}ve r\u{e9}sum\u{e9}".to_string(), 0);
        assert_eq!(text.char_count(), 12);
        assert_eq!(text.as_str().len(), 15);
    }
}
