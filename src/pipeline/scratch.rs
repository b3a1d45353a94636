//! Scratch files for file-based conversion engines.
//!
//! A [`ScratchPair`] owns the temporary input PDF and the path the engine
//! writes its DOCX to. Both are removed when the pair is dropped, whether
//! the conversion returned normally, failed, or unwound from a panic.
//! Removal problems are logged and otherwise ignored so they never replace
//! the conversion's own result.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use tracing::{debug, warn};

/// Prefix for every scratch file name.
pub const SCRATCH_PREFIX: &str = "pdf2docx-";

/// The input/output file pair of one conversion call.
#[derive(Debug)]
pub struct ScratchPair {
    input: Option<TempPath>,
    output: PathBuf,
}

impl ScratchPair {
    /// Write `bytes` to a fresh uniquely named `.pdf` file in `dir` and
    /// reserve the matching `.docx` path next to it.
    pub fn create(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        let mut file = Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let input = file.into_temp_path();
        let output = input.with_extension("docx");
        debug!(
            "Scratch files: {} -> {}",
            input.display(),
            output.display()
        );

        Ok(Self {
            input: Some(input),
            output,
        })
    }

    pub fn input(&self) -> &Path {
        self.input.as_deref().unwrap_or_else(|| Path::new(""))
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Drop for ScratchPair {
    fn drop(&mut self) {
        if let Some(input) = self.input.take() {
            let path = input.to_path_buf();
            if let Err(e) = input.close() {
                log_cleanup_failure(&path, &e);
            }
        }
        if let Err(e) = std::fs::remove_file(&self.output) {
            log_cleanup_failure(&self.output, &e);
        }
    }
}

fn log_cleanup_failure(path: &Path, error: &io::Error) {
    if error.kind() != io::ErrorKind::NotFound {
        warn!(
            "Could not remove temporary file {}: {}",
            path.display(),
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn create_writes_input_and_derives_output() {
        let dir = tempfile::tempdir().unwrap();
        let pair = ScratchPair::create(dir.path(), b"%PDF-1.4 test").unwrap();

        assert_eq!(std::fs::read(pair.input()).unwrap(), b"%PDF-1.4 test");
        assert_eq!(pair.input().extension().unwrap(), "pdf");
        assert_eq!(pair.output().extension().unwrap(), "docx");
        assert_eq!(pair.input().file_stem(), pair.output().file_stem());
        assert!(pair
            .input()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(SCRATCH_PREFIX));
        assert!(!pair.output().exists());
    }

    #[test]
    fn drop_removes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        {
            let pair = ScratchPair::create(dir.path(), b"%PDF-").unwrap();
            std::fs::write(pair.output(), b"PK").unwrap();
            assert_eq!(entries(dir.path()).len(), 2);
        }
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn drop_without_output_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        drop(ScratchPair::create(dir.path(), b"%PDF-").unwrap());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = ScratchPair::create(dir.path(), b"a").unwrap();
        let b = ScratchPair::create(dir.path(), b"b").unwrap();
        assert_ne!(a.input(), b.input());
        assert_ne!(a.output(), b.output());
    }

    #[test]
    fn create_in_missing_dir_fails() {
        assert!(ScratchPair::create(Path::new("/definitely/not/here"), b"x").is_err());
    }
}
