//! Binding to the pdfium shared library.
//!
//! pdfium is initialised once per process and shared: dropping a `Pdfium`
//! tears the library down for every other user, so nothing in this crate
//! owns one. Resolution order for the first bind:
//!
//! 1. `PDFIUM_LIB_PATH`, an explicit path to `libpdfium`.
//! 2. `./`, the platform library name in the working directory.
//! 3. The system library search path.
//!
//! A failed bind is not cached; the next call tries again.

use crate::error::Pdf2DocxError;
use once_cell::sync::OnceCell;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Environment variable naming an explicit pdfium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

static PDFIUM: OnceCell<Pdfium> = OnceCell::new();

/// The process-wide pdfium instance, bound on first use.
pub fn shared() -> Result<&'static Pdfium, Pdf2DocxError> {
    PDFIUM.get_or_try_init(|| {
        let pdfium = bind()?;
        info!("pdfium library bound");
        Ok(pdfium)
    })
}

fn bind() -> Result<Pdfium, Pdf2DocxError> {
    if let Some(path) = std::env::var_os(PDFIUM_LIB_PATH_ENV).map(PathBuf::from) {
        debug!("Binding pdfium from {}", path.display());
        return Pdfium::bind_to_library(&path)
            .map(Pdfium::new)
            .map_err(|e| {
                Pdf2DocxError::PdfiumBindingFailed(format!("{}: {e}", path.display()))
            });
    }

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Pdf2DocxError::PdfiumBindingFailed(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// True when a pdfium load error means the document needs a password.
pub(crate) fn is_password_error(error: &PdfiumError) -> bool {
    matches!(
        error,
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError)
    ) || format!("{error:?}").contains("Password")
}

/// Plain wording for a pdfium error, fit to show to whoever uploaded the file.
pub fn describe_error(error: &PdfiumError) -> &'static str {
    match error {
        PdfiumError::PdfiumLibraryInternalError(internal) => match internal {
            PdfiumInternalError::FileError => "the file could not be read",
            PdfiumInternalError::FormatError => "the file is not a valid PDF or is corrupted",
            PdfiumInternalError::PasswordError => "the PDF is password protected",
            PdfiumInternalError::SecurityError => "the PDF uses an unsupported security scheme",
            PdfiumInternalError::PageError => "a page could not be loaded",
            _ => "the PDF could not be opened",
        },
        _ if is_password_error(error) => "the PDF is password protected",
        _ => "the PDF could not be processed",
    }
}
