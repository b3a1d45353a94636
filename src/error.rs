//! Error types for the pdf2docx library.
//!
//! Three error types reflect three distinct failure modes:
//!
//! * [`ValidationError`] — **Rejection**: the upload is not a PDF we can
//!   convert (corrupt, password protected, no pages). It is reported inside
//!   a [`crate::output::ValidationReport`], never returned as `Err`.
//!
//! * [`Pdf2DocxError`] — **Fatal for one request**: the input could not be
//!   read, the configuration is invalid, or the conversion itself failed.
//!   Returned as `Err(Pdf2DocxError)` from the top-level functions.
//!
//! * [`EngineError`] — raised by a [`crate::engine::ConversionEngine`]. The
//!   converter folds it into [`Pdf2DocxError::ConversionFailed`].
//!
//! Failing to delete a temporary file is not an error at all: it is logged
//! and otherwise ignored.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Why an upload was rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The buffer is not a parseable PDF, or its first page cannot be read.
    #[error("not a readable PDF document: {detail}")]
    Malformed { detail: String },

    /// The document requires a password to open.
    #[error("PDF is password protected; encrypted documents are not supported")]
    Encrypted,

    /// The document parsed but contains no pages.
    #[error("PDF is empty: it contains no pages")]
    Empty,
}

/// All fatal errors returned by the pdf2docx library.
#[derive(Debug, Error)]
pub enum Pdf2DocxError {
    // ── Conversion errors ─────────────────────────────────────────────────
    /// The conversion engine failed, or its output could not be read back.
    #[error("Conversion failed: {detail}")]
    ConversionFailed { detail: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is neither a readable file nor a valid HTTP/HTTPS URL.
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The upload is larger than the configured limit.
    #[error("File '{name}' is too large: {size} bytes (limit {limit} bytes)")]
    UploadTooLarge { name: String, size: u64, limit: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output DOCX file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the executable, install it system-wide, or\n\
set PDFIUM_LIB_PATH=/path/to/libpdfium.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// An error raised by a conversion engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// pdfium could not be bound, or failed while reading the document.
    #[error("pdfium: {0}")]
    Pdfium(String),

    /// The input requires a password.
    #[error("document is password protected")]
    PasswordRequired,

    /// The DOCX package could not be written.
    #[error("failed to write DOCX package: {0}")]
    Docx(String),

    /// Reading or writing one of the engine's files failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external converter exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The engine reported success but produced no output file.
    #[error("engine produced no output at '{path}'")]
    MissingOutput { path: PathBuf },
}
