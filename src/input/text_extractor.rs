//! Text extraction from various document formats

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::processing::document::Document;
use log::debug;
use pulldown_cmark::{Event, Parser, Tag};

pub trait TextExtractor {
    /// Turn raw document bytes into page-joined text
    fn extract(&self, bytes: &[u8]) -> Result<Document>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Document> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            ResumeMatcherError::Extraction(format!("Failed to parse PDF: {}", e))
        })?;

        let document = Document::from_pages(&pages);
        debug!(
            "Extracted {} of {} PDF pages ({} without text)",
            document.page_count(),
            pages.len(),
            document.skipped_pages()
        );
        Ok(document)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Document> {
        let content = std::str::from_utf8(bytes).map_err(|e| {
            ResumeMatcherError::Extraction(format!("Text file is not valid UTF-8: {}", e))
        })?;
        Ok(Document::from_text(content.trim_start_matches('\u{feff}')))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Document> {
        let markdown = std::str::from_utf8(bytes).map_err(|e| {
            ResumeMatcherError::Extraction(format!("Markdown file is not valid UTF-8: {}", e))
        })?;
        Ok(Document::from_text(self.markdown_to_text(markdown)))
    }
}

impl MarkdownExtractor {
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Route bytes to the extractor for their file type
pub fn extract_document(bytes: &[u8], file_type: FileType) -> Result<Document> {
    match file_type {
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(
            "Unknown document type".to_string(),
        )),
    }
}
