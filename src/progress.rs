//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConverterConfigBuilder::progress_callback`] to receive
//! stage and per-page events while a document is converted.
//!
//! # Example
//!
//! ```rust
//! use pdf2docx::{ConversionProgressCallback, ConversionStage, ConverterConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     pages: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for PageCounter {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {page_num}/{total_pages}");
//!     }
//! }
//!
//! let counter = Arc::new(PageCounter { pages: AtomicUsize::new(0) });
//!
//! let config = ConverterConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Coarse phases of a single conversion call, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStage {
    /// Writing the input to a scratch file.
    Preparing,
    /// The engine is running.
    Converting,
    /// Reading the produced document back into memory.
    Finalizing,
    /// The document is ready.
    Finished,
    /// The conversion failed; no document was produced.
    Failed,
}

impl ConversionStage {
    /// Rough completion percentage for progress bars.
    pub fn percent(self) -> u8 {
        match self {
            ConversionStage::Preparing => 25,
            ConversionStage::Converting => 50,
            ConversionStage::Finalizing => 75,
            ConversionStage::Finished => 100,
            ConversionStage::Failed => 0,
        }
    }
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConversionStage::Preparing => "Preparing file for conversion",
            ConversionStage::Converting => "Converting",
            ConversionStage::Finalizing => "Finishing conversion",
            ConversionStage::Finished => "Conversion complete",
            ConversionStage::Failed => "Conversion failed",
        };
        f.write_str(label)
    }
}

/// Called by the converter and engines as a document is processed.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called when the conversion enters a new stage.
    fn on_stage(&self, stage: ConversionStage) {
        let _ = stage;
    }

    /// Called by engines that work page by page, after each page is written.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    fn on_page_complete(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConverterConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
