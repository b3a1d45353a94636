//! Result types returned by the validator, info extractor and converter.

use crate::error::ValidationError;
use crate::naming::DOCX_MIME_TYPE;
use serde::{Deserialize, Serialize};

/// Outcome of validating one upload.
///
/// `page_count` is always 0 when `valid` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub error: Option<ValidationError>,
    pub page_count: usize,
}

impl ValidationReport {
    /// A successful validation of a document with `page_count` pages.
    pub fn accepted(page_count: usize) -> Self {
        Self {
            valid: true,
            error: None,
            page_count,
        }
    }

    /// A rejection. The page count is reported as zero.
    pub fn rejected(error: ValidationError) -> Self {
        Self {
            valid: false,
            error: Some(error),
            page_count: 0,
        }
    }

    /// Human-readable rejection message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Convert into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<usize, ValidationError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.page_count),
        }
    }
}

/// Document-level metadata read from the PDF info dictionary.
///
/// Absent or empty fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// A converted document, ready to be offered for download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedDocument {
    /// Raw DOCX bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Download name derived from the original upload name.
    pub file_name: String,
    /// Name of the engine that produced the document.
    pub engine: String,
    /// Wall-clock time spent in the converter.
    pub duration_ms: u64,
}

impl ConvertedDocument {
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
