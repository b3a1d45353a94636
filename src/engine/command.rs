//! External-program engine.
//!
//! Runs a converter installed on the machine, for example the Python
//! `pdf2docx` CLI or LibreOffice, against the scratch paths. The argument
//! template uses `{input}` and `{output}` placeholders:
//!
//! ```rust
//! use pdf2docx::CommandEngine;
//!
//! let engine = CommandEngine::parse("pdf2docx convert {input} {output}").unwrap();
//! assert_eq!(engine.program(), "pdf2docx");
//! ```

use super::ConversionEngine;
use crate::error::{EngineError, Pdf2DocxError};
use crate::progress::ConversionProgressCallback;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Longest stderr excerpt carried in an error.
const MAX_STDERR_CHARS: usize = 500;

/// Engine that shells out to an external converter.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    /// Build an engine from a program and argument template.
    ///
    /// The template must mention `{input}`; when `{output}` is missing the
    /// program is expected to write next to its input, which is where the
    /// converter looks for the result anyway.
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, Pdf2DocxError> {
        let program = program.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        if program.trim().is_empty() {
            return Err(Pdf2DocxError::InvalidConfig(
                "engine command is empty".into(),
            ));
        }
        if !args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            return Err(Pdf2DocxError::InvalidConfig(format!(
                "engine command must reference {INPUT_PLACEHOLDER}"
            )));
        }
        Ok(Self { program, args })
    }

    /// Parse a whitespace-separated command line such as
    /// `"soffice --headless --convert-to docx --outdir {output_dir} {input}"`.
    pub fn parse(command_line: &str) -> Result<Self, Pdf2DocxError> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next().unwrap_or_default();
        Self::new(program, parts)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with placeholders replaced by the given paths.
    ///
    /// `{output_dir}` expands to the directory containing `output`.
    pub fn render_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let output_dir = output
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.args
            .iter()
            .map(|a| {
                a.replace("{output_dir}", &output_dir)
                    .replace(INPUT_PLACEHOLDER, &input.display().to_string())
                    .replace(OUTPUT_PLACEHOLDER, &output.display().to_string())
            })
            .collect()
    }
}

impl ConversionEngine for CommandEngine {
    fn name(&self) -> &str {
        "command"
    }

    fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        _progress: &dyn ConversionProgressCallback,
    ) -> Result<(), EngineError> {
        let args = self.render_args(input, output);
        info!("Running external converter: {} {:?}", self.program, args);

        let result = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| EngineError::Io {
                path: self.program.clone().into(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            return Err(EngineError::CommandFailed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr,
            });
        }
        debug!("External converter exited cleanly");

        if !output.exists() {
            return Err(EngineError::MissingOutput {
                path: output.to_path_buf(),
            });
        }
        Ok(())
    }
}
