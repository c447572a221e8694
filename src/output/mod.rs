//! Report assembly and rendering

pub mod report;
pub mod formatter;

pub use formatter::{
    resolve_report_path, save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator,
    DEFAULT_PDF_REPORT,
};
pub use report::{AnalysisReport, NO_MISMATCHES_MESSAGE};
