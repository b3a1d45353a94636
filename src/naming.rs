//! Output file naming for converted documents.

use once_cell::sync::Lazy;
use regex::Regex;

/// MIME type for Word (OOXML) documents.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Appended to the input's base name.
pub const OUTPUT_SUFFIX: &str = "_converted";

/// Extension of the produced document, without the dot.
pub const OUTPUT_EXTENSION: &str = "docx";

static PDF_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.pdf$").unwrap());

/// Derive the download name for a converted upload.
///
/// A trailing `.pdf` (any case) is stripped, then `_converted.docx` is
/// appended. Names without the extension are kept whole.
///
/// ```rust
/// use pdf2docx::output_filename;
///
/// assert_eq!(output_filename("report.PDF"), "report_converted.docx");
/// assert_eq!(output_filename("notes"), "notes_converted.docx");
/// ```
pub fn output_filename(original_name: &str) -> String {
    let base = PDF_EXTENSION.replace(original_name, "");
    format!("{base}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}")
}
