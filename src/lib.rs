//! # pdf2docx
//!
//! Validate PDF uploads and convert them to Word (DOCX) documents.
//!
//! ## Request flow
//!
//! ```text
//! Upload (bytes + file name)
//!  │
//!  ├─ 1. Validate   %PDF- header, pdfium open, encryption, page count, page 1 text
//!  ├─ 2. Inspect    title / author / subject / creator (best-effort)
//!  ├─ 3. Estimate   page-count bucket → "a few seconds" … "more than 5 minutes"
//!  ├─ 4. Convert    scratch PDF → engine → scratch DOCX → bytes (files always removed)
//!  └─ 5. Name       report.pdf → report_converted.docx
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2docx::{convert, estimate_conversion_time, validate, ConverterConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("report.pdf")?;
//!
//!     let report = validate(&bytes)?;
//!     if let Some(msg) = report.error_message() {
//!         eprintln!("rejected: {msg}");
//!         return Ok(());
//!     }
//!     eprintln!("{} pages, about {}", report.page_count,
//!         estimate_conversion_time(report.page_count));
//!
//!     let doc = convert(&bytes, "report.pdf", &ConverterConfig::default())?;
//!     std::fs::write(&doc.file_name, &doc.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2docx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## PDFium
//!
//! Validation, metadata and the built-in engine use pdfium through
//! `pdfium-render`, bound once per process and shared. The library is looked
//! up via `PDFIUM_LIB_PATH`, then the working directory, then the system
//! search path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConverterConfig, ConverterConfigBuilder, InputLimits, DEFAULT_MAX_UPLOAD_BYTES};
pub use convert::{convert, extract_info, validate, write_output};
pub use engine::{CommandEngine, ConversionEngine, PdfiumDocxEngine};
pub use error::{EngineError, Pdf2DocxError, ValidationError};
pub use estimate::{estimate_conversion_time, TimeEstimate};
pub use naming::{output_filename, DOCX_MIME_TYPE};
pub use output::{ConvertedDocument, DocumentInfo, ValidationReport};
pub use pipeline::input::{resolve_input, Upload};
pub use progress::{
    ConversionProgressCallback, ConversionStage, NoopProgressCallback, ProgressCallback,
};
