//! Request pipeline stages.
//!
//! ```text
//! path / URL
//!  │
//!  ├─ input     read the file or download it into an Upload (size-capped)
//!  ├─ validate  header sniff, pdfium open, encryption / page checks
//!  ├─ metadata  title, author, … (best-effort)
//!  └─ scratch   temp PDF + DOCX pair handed to the conversion engine
//! ```

pub mod input;
pub mod metadata;
pub mod pdfium;
pub mod scratch;
pub mod validate;
