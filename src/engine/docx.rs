//! Built-in engine: pdfium text extraction into a DOCX package.
//!
//! Every page becomes a run of paragraphs, one per text line pdfium reports,
//! with a page break between pages. Layout, fonts and images are not carried
//! over; the output is the document's text in reading order.

use super::ConversionEngine;
use crate::error::EngineError;
use crate::pipeline::pdfium::{describe_error, is_password_error, shared};
use crate::progress::ConversionProgressCallback;
use docx_rs::{BreakType, Docx, Paragraph, Run};
use pdfium_render::prelude::*;
use std::io::{Seek, Write};
use std::path::Path;
use tracing::{debug, info};

/// Text-only PDF → DOCX engine backed by pdfium and `docx-rs`.
#[derive(Debug, Clone)]
pub struct PdfiumDocxEngine {
    page_breaks: bool,
}

impl Default for PdfiumDocxEngine {
    fn default() -> Self {
        Self { page_breaks: true }
    }
}

impl PdfiumDocxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hard page break between source pages. Default: true.
    pub fn page_breaks(mut self, enabled: bool) -> Self {
        self.page_breaks = enabled;
        self
    }

    fn extract_pages(
        &self,
        input: &Path,
        progress: &dyn ConversionProgressCallback,
    ) -> Result<Vec<Vec<String>>, EngineError> {
        let pdfium = shared().map_err(|e| EngineError::Pdfium(e.to_string()))?;

        let document = pdfium.load_pdf_from_file(input, None).map_err(|e| {
            if is_password_error(&e) {
                EngineError::PasswordRequired
            } else {
                debug!("pdfium load error: {:?}", e);
                EngineError::Pdfium(describe_error(&e).to_string())
            }
        })?;

        let total = document.pages().len() as usize;
        info!("Extracting text from {} pages", total);

        let mut pages = Vec::with_capacity(total);
        for (idx, page) in document.pages().iter().enumerate() {
            let text = page
                .text()
                .map_err(|e| {
                    EngineError::Pdfium(format!("page {}: {}", idx + 1, describe_error(&e)))
                })?
                .all();
            let lines = split_lines(&text);
            debug!("Page {}: {} lines", idx + 1, lines.len());
            pages.push(lines);
            progress.on_page_complete(idx + 1, total);
        }

        Ok(pages)
    }
}

impl ConversionEngine for PdfiumDocxEngine {
    fn name(&self) -> &str {
        "pdfium-docx"
    }

    fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        progress: &dyn ConversionProgressCallback,
    ) -> Result<(), EngineError> {
        let pages = self.extract_pages(input, progress)?;

        let file = std::fs::File::create(output).map_err(|source| EngineError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        write_docx(&pages, self.page_breaks, file)
    }
}

/// Pack `pages` (each a list of text lines) into a DOCX written to `writer`.
///
/// Each line becomes one paragraph. A page without text still gets an
/// empty paragraph so page breaks land where the source pages were.
/// Characters XML 1.0 forbids are dropped.
pub fn write_docx<W: Write + Seek>(
    pages: &[Vec<String>],
    page_breaks: bool,
    writer: W,
) -> Result<(), EngineError> {
    let mut docx = Docx::new();

    for (idx, lines) in pages.iter().enumerate() {
        if idx > 0 && page_breaks {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
        }
        if lines.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
        }
        for line in lines {
            let text: String = line.chars().filter(|&c| is_xml_char(c)).collect();
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
        }
    }

    docx.build()
        .pack(writer)
        .map_err(|e| EngineError::Docx(e.to_string()))
}

/// Split pdfium page text into non-empty lines, dropping characters that
/// are not allowed in XML.
fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.chars()
                .filter(|&c| is_xml_char(c))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Tab plus printable characters, minus the U+FFFE / U+FFFF noncharacters.
/// pdfium emits U+FFFE for some soft hyphens.
fn is_xml_char(c: char) -> bool {
    c == '\t' || !(c.is_control() || c == '\u{FFFE}' || c == '\u{FFFF}')
}
