//! Output formatters: console, JSON, Markdown and PDF

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::AnalysisReport;
use crate::processing::fit::FitCategory;
use colored::{Color, Colorize};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::path::{Path, PathBuf};

/// Trait for rendering an analysis report into a downloadable artifact
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<Vec<u8>>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct PdfFormatter {
    include_previews: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    pdf_formatter: PdfFormatter,
}

fn fit_color(fit: FitCategory) -> Color {
    match fit {
        FitCategory::Excellent => Color::Green,
        FitCategory::Moderate => Color::Yellow,
        FitCategory::NeedsImprovement => Color::Red,
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n{} {}\n", "▓", title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let result = &report.match_result;
        let fit = result.fit_assessment();
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS REPORT"));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms | Model: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.embedding_model
        ));

        output.push_str(&self.format_header("Matching Score"));
        output.push_str(&format!(
            "{} [{}]\n",
            report.score_text(),
            self.colorize(&fit.label().to_uppercase(), fit_color(fit))
        ));

        output.push_str(&self.format_header("Candidate Fit Assessment"));
        output.push_str(&format!("{}\n", self.colorize(fit.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Key Job Requirements Missing in Resume"));
        output.push_str(&format!("{}\n", report.missing_keywords_text()));

        output.push_str(&self.format_header("Areas for Improvement"));
        for (i, area) in report.improvement_areas.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}: {}\n",
                i + 1,
                self.colorize(&area.title, Color::White),
                area.description
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Job Description (Preview)"));
            output.push_str(&format!("{}...\n", report.job_preview));

            output.push_str(&self.format_header("Resume Content (Preview)"));
            output.push_str(&format!("{}...\n", report.resume_preview));
        }

        if report.metadata.dropped_chars > 0 {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize(
                    &format!(
                        "Note: {} character(s) could not be represented and were dropped from the analyzed text.",
                        report.metadata.dropped_chars
                    ),
                    Color::Yellow
                )
            ));
        }

        Ok(output.into_bytes())
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        if self.pretty {
            Ok(serde_json::to_vec_pretty(report)?)
        } else {
            Ok(serde_json::to_vec(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let result = &report.match_result;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Model:** `{}`\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.embedding_model
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_file)
            ));
        }

        output.push_str("## Matching Score\n\n");
        output.push_str(&format!("**{}**\n\n", report.score_text()));

        output.push_str("## Candidate Fit Assessment\n\n");
        output.push_str(&format!("{}\n\n", result.fit_assessment().verdict()));

        output.push_str("## Key Job Requirements Missing in Resume\n\n");
        output.push_str(&format!("{}\n\n", report.missing_keywords_text()));

        output.push_str("## Areas for Improvement\n\n");
        for (i, area) in report.improvement_areas.iter().enumerate() {
            output.push_str(&format!("{}. **{}**: {}\n", i + 1, area.title, area.description));
        }

        output.push_str("\n## Job Description (Preview)\n\n```text\n");
        output.push_str(&format!("{}...\n```\n", report.job_preview));

        output.push_str("\n## Resume Content (Preview)\n\n```text\n");
        output.push_str(&format!("{}...\n```\n", report.resume_preview));

        Ok(output.into_bytes())
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

// A4 portrait, built-in Helvetica (Latin-1 only)
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const BODY_FONT_SIZE: f32 = 11.0;
const HEADING_FONT_SIZE: f32 = 12.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const CHARS_PER_LINE: usize = 90;

/// Cursor over a printpdf document that starts a new page when full
struct PdfPageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfPageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn ensure_space(&mut self) {
        if self.y < MARGIN_MM + LINE_HEIGHT_MM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_space();
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_HEIGHT_MM;
    }

    fn heading(&mut self, text: &str) {
        self.line(text, HEADING_FONT_SIZE, true);
    }

    fn paragraph(&mut self, text: &str) {
        for line in text.lines() {
            for wrapped in wrap_text(line, CHARS_PER_LINE) {
                self.line(&wrapped, BODY_FONT_SIZE, false);
            }
        }
    }

    fn gap(&mut self, lines: f32) {
        self.y -= LINE_HEIGHT_MM * lines;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(err: impl std::fmt::Display) -> ResumeMatcherError {
    ResumeMatcherError::OutputFormatting(format!("PDF rendering failed: {}", err))
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        while chars.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        let word_len = chars.len();
        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl PdfFormatter {
    pub fn new(include_previews: bool) -> Self {
        Self { include_previews }
    }
}

impl OutputFormatter for PdfFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let result = &report.match_result;
        let mut pdf = PdfPageWriter::new("Resume Analysis Report")?;

        pdf.line("Resume Analysis Report", TITLE_FONT_SIZE, true);
        pdf.gap(1.0);

        pdf.heading("Matching Score:");
        pdf.paragraph(&report.score_text());
        pdf.gap(0.5);

        pdf.heading("Candidate Fit Assessment:");
        pdf.paragraph(result.fit_assessment().verdict());
        pdf.gap(1.0);

        pdf.heading("Key Job Requirements Missing in Resume:");
        pdf.paragraph(&report.missing_keywords_text());
        pdf.gap(1.0);

        pdf.heading("Areas for Improvement:");
        for (i, area) in report.improvement_areas.iter().enumerate() {
            pdf.paragraph(&format!("{}. {}: {}", i + 1, area.title, area.description));
        }
        pdf.gap(1.0);

        if self.include_previews {
            pdf.heading("Job Description (Preview):");
            pdf.paragraph(&format!("{}...", report.job_preview));
            pdf.gap(0.5);

            pdf.heading("Resume Content (Preview):");
            pdf.paragraph(&format!("{}...", report.resume_preview));
        }

        pdf.finish()
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            pdf_formatter: PdfFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Pdf => self.pdf_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "resume".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Pdf => "pdf",
    };

    format!("{}_report{}.{}", base_name, timestamp_suffix, extension)
}

/// Where PDF reports go when no save path is given
pub const DEFAULT_PDF_REPORT: &str = "resume_report.pdf";

/// Destination for a rendered report, or `None` to print it. A directory
/// gets a file name derived from the resume name and format.
pub fn resolve_report_path(
    save: Option<&Path>,
    format: OutputFormat,
    resume_file: &Path,
) -> Option<PathBuf> {
    match save {
        Some(dir) if dir.is_dir() => {
            Some(dir.join(suggest_filename(format, &resume_file.to_string_lossy(), false)))
        }
        Some(path) => Some(path.to_path_buf()),
        None if format == OutputFormat::Pdf => Some(PathBuf::from(DEFAULT_PDF_REPORT)),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;
    use crate::output::report::NO_MISMATCHES_MESSAGE;
    use tempfile::TempDir;

    #[test]
    fn test_console_report_without_colors() {
        let report = sample_report("Rust developer", "Rust developer with Kafka");
        let bytes = ConsoleFormatter::new(false, true).format_report(&report).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Matching Score"));
        assert!(text.contains("with, kafka"));
        assert!(text.contains("Areas for Improvement"));
        assert!(text.contains("Rust developer..."));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_json_report_is_parseable() {
        let report = sample_report("Rust", "Rust Go");
        let bytes = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["match_result"]["missing_keywords"], serde_json::json!(["go"]));
        assert!(value["match_result"]["similarity_score"].is_number());
        assert_eq!(value["improvement_areas"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_markdown_report_no_mismatches() {
        let report = sample_report("Go and Rust", "Rust");
        let bytes = MarkdownFormatter::new(true).format_report(&report).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("# Resume Analysis Report"));
        assert!(text.contains(NO_MISMATCHES_MESSAGE));
        assert!(text.contains("`resume.pdf`"));
    }

    #[test]
    fn test_pdf_report_is_a_pdf() {
        let long_resume = "Experienced engineer building data pipelines. ".repeat(200);
        let report = sample_report(&long_resume, "Data engineer, Spark, Airflow");
        let bytes = PdfFormatter::new(true).format_report(&report).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("   ", 10).is_empty());

        for line in wrap_text(&"lorem ipsum dolor ".repeat(40), 30) {
            assert!(line.chars().count() <= 30);
        }
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Pdf, "docs/jane_doe.pdf", false),
            "jane_doe_report.pdf"
        );
        assert_eq!(suggest_filename(OutputFormat::Json, "", false), "resume_report.json");
    }

    #[test]
    fn test_report_path_in_directory_uses_suggested_name() {
        let temp_dir = TempDir::new().unwrap();
        let resume = Path::new("cv/jane_doe.pdf");

        assert_eq!(
            resolve_report_path(Some(temp_dir.path()), OutputFormat::Markdown, resume),
            Some(temp_dir.path().join("jane_doe_report.md"))
        );

        let explicit = temp_dir.path().join("custom.json");
        assert_eq!(
            resolve_report_path(Some(&explicit), OutputFormat::Json, resume),
            Some(explicit.clone())
        );
    }

    #[test]
    fn test_report_path_defaults() {
        let resume = Path::new("cv/jane_doe.pdf");
        assert_eq!(
            resolve_report_path(None, OutputFormat::Pdf, resume),
            Some(PathBuf::from(DEFAULT_PDF_REPORT))
        );
        assert_eq!(resolve_report_path(None, OutputFormat::Console, resume), None);
        assert_eq!(resolve_report_path(None, OutputFormat::Json, resume), None);
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("report.md");

        save_report_to_file(b"# Report", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"# Report");
    }
}
