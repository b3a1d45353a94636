//! Conversion engines.
//!
//! The converter talks to engines through files: it hands over the path of
//! a scratch PDF and the path the DOCX must be written to. Two engines ship
//! with the crate:
//!
//! | Engine | Name | What it does |
//! |--------|------|--------------|
//! | [`PdfiumDocxEngine`] | `pdfium-docx` | Extracts page text with pdfium, writes a DOCX with `docx-rs` |
//! | [`CommandEngine`]    | `command`     | Runs an external converter such as `pdf2docx convert {input} {output}` |
//!
//! Implement [`ConversionEngine`] to plug in anything else.

mod command;
mod docx;

pub use command::CommandEngine;
pub use docx::{write_docx, PdfiumDocxEngine};

use crate::error::EngineError;
use crate::progress::ConversionProgressCallback;
use std::path::Path;

/// A PDF → DOCX converter working on file paths.
///
/// Implementations convert every page of `input` and write the result to
/// `output`. They must not delete `input`; the caller owns both files.
pub trait ConversionEngine: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Convert the PDF at `input` into a DOCX at `output`.
    fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        progress: &dyn ConversionProgressCallback,
    ) -> Result<(), EngineError>;
}
