//! Reduces extracted text to what the report's Latin-1 fonts can render

use crate::processing::document::{Document, SanitizedText};
use log::debug;
use unicode_normalization::UnicodeNormalization;

/// Highest code point representable in ISO-8859-1
const LATIN1_MAX: char = '\u{ff}';

/// Stateless sanitizer. Lossy: anything outside Latin-1 after NFKD is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSanitizer;

impl TextSanitizer {
    pub fn new() -> Self {
        Self
    }

    pub fn sanitize(&self, document: &Document) -> SanitizedText {
        self.sanitize_str(document.text())
    }

    pub fn sanitize_str(&self, text: &str) -> SanitizedText {
        let dashes_replaced = text.replace('\u{2013}', "-").replace('\u{2014}', "--");

        let mut dropped = 0;
        let cleaned: String = dashes_replaced
            .nfkd()
            .filter(|&c| {
                let keep = c <= LATIN1_MAX;
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if dropped > 0 {
            debug!(
                "Sanitization dropped {} character(s) without a Latin-1 representation",
                dropped
            );
        }

        SanitizedText::new(cleaned, dropped)
    }
}
