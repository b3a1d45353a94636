//! Configuration types for validation and conversion.
//!
//! Conversion behaviour is controlled through [`ConverterConfig`], built via
//! its [`ConverterConfigBuilder`]. Input handling (size limit, download
//! timeout) lives in [`InputLimits`], which the caller applies before any
//! bytes reach the validator.

use crate::engine::{ConversionEngine, PdfiumDocxEngine};
use crate::error::Pdf2DocxError;
use crate::progress::{NoopProgressCallback, ProgressCallback};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default upload limit: 200 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Configuration for a PDF-to-DOCX conversion.
///
/// Built via [`ConverterConfig::builder()`] or using
/// [`ConverterConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2docx::{ConverterConfig, PdfiumDocxEngine};
/// use std::sync::Arc;
///
/// let config = ConverterConfig::builder()
///     .engine(Arc::new(PdfiumDocxEngine::new().page_breaks(false)))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConverterConfig {
    /// Engine that turns the scratch PDF into a DOCX file.
    /// Default: [`PdfiumDocxEngine`].
    pub engine: Arc<dyn ConversionEngine>,

    /// Directory for the two scratch files. `None` uses the platform temp dir.
    pub scratch_dir: Option<PathBuf>,

    /// Receives stage and page events.
    pub progress_callback: ProgressCallback,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            engine: Arc::new(PdfiumDocxEngine::default()),
            scratch_dir: None,
            progress_callback: Arc::new(NoopProgressCallback),
        }
    }
}

impl fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("engine", &self.engine.name())
            .field("scratch_dir", &self.scratch_dir)
            .field("progress_callback", &"<dyn ConversionProgressCallback>")
            .finish()
    }
}

impl ConverterConfig {
    /// Create a new builder for `ConverterConfig`.
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder {
            config: Self::default(),
        }
    }

    /// The directory scratch files are created in.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Builder for [`ConverterConfig`].
#[derive(Debug)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    pub fn engine(mut self, engine: Arc<dyn ConversionEngine>) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scratch_dir = Some(dir.into());
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = callback;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConverterConfig, Pdf2DocxError> {
        if let Some(ref dir) = self.config.scratch_dir {
            if !dir.is_dir() {
                return Err(Pdf2DocxError::InvalidConfig(format!(
                    "scratch directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        Ok(self.config)
    }
}

/// Limits applied to an upload before it is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Largest accepted upload, in bytes. Default: 200 MiB.
    pub max_upload_bytes: u64,
    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            download_timeout_secs: 120,
        }
    }
}

impl InputLimits {
    /// Limits with the upload cap given in megabytes.
    pub fn with_max_megabytes(mut self, megabytes: u64) -> Result<Self, Pdf2DocxError> {
        if megabytes == 0 {
            return Err(Pdf2DocxError::InvalidConfig(
                "maximum upload size must be ≥ 1 MB".into(),
            ));
        }
        self.max_upload_bytes = megabytes.saturating_mul(1024 * 1024);
        Ok(self)
    }

    /// Reject `size` bytes if they exceed the upload cap.
    pub fn check_size(&self, name: &str, size: u64) -> Result<(), Pdf2DocxError> {
        if size > self.max_upload_bytes {
            return Err(Pdf2DocxError::UploadTooLarge {
                name: name.to_string(),
                size,
                limit: self.max_upload_bytes,
            });
        }
        Ok(())
    }
}
