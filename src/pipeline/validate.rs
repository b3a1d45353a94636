//! Upload validation: is this a PDF we can convert?
//!
//! Checks run cheapest first. A buffer without a `%PDF-` header is rejected
//! before pdfium is touched; everything else is opened without a password,
//! counted, and its first page's text layer is read to catch documents whose
//! page tree parses but whose content does not.

use crate::error::ValidationError;
use crate::output::ValidationReport;
use crate::pipeline::pdfium::{describe_error, is_password_error};
use pdfium_render::prelude::*;
use tracing::{debug, warn};

/// How far into the buffer the `%PDF-` header may appear.
///
/// Readers tolerate leading junk before the header; 1024 bytes matches the
/// window Acrobat accepts.
pub const HEADER_SEARCH_WINDOW: usize = 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Returns the byte offset of the `%PDF-` header, if present near the start.
pub fn find_pdf_header(bytes: &[u8]) -> Option<usize> {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
}

/// Validate `bytes` as a convertible PDF.
///
/// Never fails: every problem is reported inside the returned
/// [`ValidationReport`].
pub fn validate(pdfium: &Pdfium, bytes: &[u8]) -> ValidationReport {
    if find_pdf_header(bytes).is_none() {
        debug!("Rejecting {} byte upload: no %PDF- header", bytes.len());
        return ValidationReport::rejected(ValidationError::Malformed {
            detail: "missing %PDF- header".into(),
        });
    }

    let document = match pdfium.load_pdf_from_byte_slice(bytes, None) {
        Ok(doc) => doc,
        Err(e) if is_password_error(&e) => {
            debug!("Rejecting upload: password required");
            return ValidationReport::rejected(ValidationError::Encrypted);
        }
        Err(e) => {
            debug!("Rejecting upload: pdfium could not parse it: {:?}", e);
            return ValidationReport::rejected(ValidationError::Malformed {
                detail: describe_error(&e).to_string(),
            });
        }
    };

    let pages = document.pages();
    let page_count = pages.len() as usize;
    if page_count == 0 {
        return ValidationReport::rejected(ValidationError::Empty);
    }

    if let Err(e) = first_page_text(&document) {
        warn!("First page unreadable: {:?}", e);
        return ValidationReport::rejected(ValidationError::Malformed {
            detail: format!("cannot read page 1: {}", describe_error(&e)),
        });
    }

    debug!("Upload accepted: {} pages", page_count);
    ValidationReport::accepted(page_count)
}

fn first_page_text(document: &PdfDocument) -> Result<String, PdfiumError> {
    let page = document.pages().get(0)?;
    let text = page.text()?;
    Ok(text.all())
}
