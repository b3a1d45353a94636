//! Top-level operations: validate, inspect and convert one upload.
//!
//! Validation and metadata extraction only read the bytes. Conversion goes
//! through two scratch files because engines work on paths; those files are
//! owned by a [`ScratchPair`] guard and disappear before [`convert`] returns.

use crate::config::ConverterConfig;
use crate::error::Pdf2DocxError;
use crate::naming::output_filename;
use crate::output::{ConvertedDocument, DocumentInfo, ValidationReport};
use crate::pipeline::scratch::ScratchPair;
use crate::pipeline::{metadata, pdfium, validate as validation};
use crate::progress::ConversionStage;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Validate an upload against the shared pdfium instance.
///
/// Fails only when pdfium itself is unavailable; problems with the document
/// are reported in the returned [`ValidationReport`].
pub fn validate(bytes: &[u8]) -> Result<ValidationReport, Pdf2DocxError> {
    let pdfium = pdfium::shared()?;
    Ok(validation::validate(pdfium, bytes))
}

/// Read document metadata.
///
/// `Ok(None)` when the bytes cannot be opened as a PDF.
pub fn extract_info(bytes: &[u8]) -> Result<Option<DocumentInfo>, Pdf2DocxError> {
    let pdfium = pdfium::shared()?;
    Ok(metadata::extract_info(pdfium, bytes))
}

/// Convert validated PDF bytes into a DOCX document.
///
/// The bytes are not re-validated. One attempt is made, and any failure
/// (scratch I/O, engine error or panic, empty result) comes back as
/// [`Pdf2DocxError::ConversionFailed`]. Scratch files are removed on every
/// path.
///
/// # Example
/// ```rust,no_run
/// use pdf2docx::{convert, ConverterConfig};
///
/// let bytes = std::fs::read("report.pdf")?;
/// let doc = convert(&bytes, "report.pdf", &ConverterConfig::default())?;
/// std::fs::write(&doc.file_name, &doc.bytes)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert(
    bytes: &[u8],
    original_name: &str,
    config: &ConverterConfig,
) -> Result<ConvertedDocument, Pdf2DocxError> {
    let start = Instant::now();
    let progress = config.progress_callback.as_ref();
    let engine = config.engine.as_ref();
    info!(
        "Converting '{}' ({} bytes) with engine '{}'",
        original_name,
        bytes.len(),
        engine.name()
    );

    let result = run_engine(bytes, config);
    match result {
        Ok(docx) => {
            progress.on_stage(ConversionStage::Finished);
            let duration_ms = start.elapsed().as_millis() as u64;
            info!(
                "Converted '{}' → {} bytes in {}ms",
                original_name,
                docx.len(),
                duration_ms
            );
            Ok(ConvertedDocument {
                bytes: docx,
                file_name: output_filename(original_name),
                engine: engine.name().to_string(),
                duration_ms,
            })
        }
        Err(detail) => {
            progress.on_stage(ConversionStage::Failed);
            warn!("Conversion of '{}' failed: {}", original_name, detail);
            Err(Pdf2DocxError::ConversionFailed { detail })
        }
    }
}

/// Scratch-file round trip. The [`ScratchPair`] is dropped, and both files
/// removed, before this returns or unwinds.
fn run_engine(bytes: &[u8], config: &ConverterConfig) -> Result<Vec<u8>, String> {
    let progress = config.progress_callback.as_ref();
    let engine = config.engine.as_ref();

    progress.on_stage(ConversionStage::Preparing);
    let scratch = ScratchPair::create(&config.scratch_dir(), bytes)
        .map_err(|e| format!("could not create temporary file: {e}"))?;

    progress.on_stage(ConversionStage::Converting);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        engine.convert_file(scratch.input(), scratch.output(), progress)
    }));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(e.to_string()),
        Err(payload) => return Err(format!("engine panicked: {}", panic_message(&*payload))),
    }

    progress.on_stage(ConversionStage::Finalizing);
    read_output(scratch.output())
}

fn read_output(path: &Path) -> Result<Vec<u8>, String> {
    let docx = std::fs::read(path)
        .map_err(|e| format!("could not read converted document: {e}"))?;
    if docx.is_empty() {
        return Err("engine produced an empty document".into());
    }
    Ok(docx)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Write `bytes` to `path` atomically (temp file in the same directory,
/// then rename).
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Pdf2DocxError> {
    let write_err = |source| Pdf2DocxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    std::io::Write::write_all(&mut tmp, bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
