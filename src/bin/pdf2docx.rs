//! CLI binary for pdf2docx.
//!
//! A thin shim over the library crate: reads the upload, validates it,
//! prints what it found, converts it and writes the DOCX next to the
//! working directory (or wherever `--output` points).

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2docx::pipeline::{metadata, pdfium, validate as validation};
use pdf2docx::{
    convert, estimate_conversion_time, output_filename, resolve_input, write_output, CommandEngine,
    ConversionEngine, ConversionProgressCallback, ConversionStage, ConverterConfig, DocumentInfo,
    InputLimits, PdfiumDocxEngine, ProgressCallback, Upload, ValidationReport,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner showing the current stage, which
/// turns into a page counter once the engine starts reporting pages.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_stage(&self, stage: ConversionStage) {
        match stage {
            ConversionStage::Finished | ConversionStage::Failed => self.bar.finish_and_clear(),
            _ => self.bar.set_message(format!("{stage}… ({}%)", stage.percent())),
        }
    }

    fn on_page_complete(&self, page_num: usize, total_pages: usize) {
        self.bar
            .set_message(format!("page {page_num}/{total_pages}"));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert; writes report_converted.docx to the current directory
  pdf2docx report.pdf

  # Choose the output path
  pdf2docx report.pdf -o out/report.docx

  # Validate and print metadata only
  pdf2docx --inspect-only report.pdf

  # Convert from URL
  pdf2docx https://arxiv.org/pdf/1706.03762 -o attention.docx

  # Use an external converter instead of the built-in engine
  pdf2docx --engine command --engine-command "pdf2docx convert {input} {output}" report.pdf

  # Machine-readable report
  pdf2docx --json --inspect-only report.pdf

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (otherwise ./ then the system library)
  RUST_LOG                Override the log filter (e.g. pdf2docx=debug)
"#;

/// Validate PDF files and convert them to Word documents.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2docx",
    version,
    about = "Validate PDF files and convert them to Word (DOCX) documents",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Write the DOCX here instead of <name>_converted.docx in the current directory.
    #[arg(short, long, env = "PDF2DOCX_OUTPUT")]
    output: Option<PathBuf>,

    /// Conversion engine.
    #[arg(long, env = "PDF2DOCX_ENGINE", value_enum, default_value = "builtin")]
    engine: EngineArg,

    /// Command line for `--engine command`; `{input}`, `{output}` and
    /// `{output_dir}` are replaced with the scratch paths.
    #[arg(long, env = "PDF2DOCX_ENGINE_COMMAND", required_if_eq("engine", "command"))]
    engine_command: Option<String>,

    /// Do not insert page breaks between source pages (built-in engine).
    #[arg(long, env = "PDF2DOCX_NO_PAGE_BREAKS")]
    no_page_breaks: bool,

    /// Directory for temporary files (default: system temp dir).
    #[arg(long, env = "PDF2DOCX_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// Maximum upload size in megabytes.
    #[arg(long, env = "PDF2DOCX_MAX_SIZE_MB", default_value_t = 200)]
    max_size_mb: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PDF2DOCX_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Validate and print metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Print a JSON report instead of human-readable lines.
    #[arg(long, env = "PDF2DOCX_JSON")]
    json: bool,

    /// Overwrite the output file if it exists.
    #[arg(short, long)]
    force: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "PDF2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2DOCX_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum EngineArg {
    /// pdfium text extraction + docx-rs.
    Builtin,
    /// External program given by --engine-command.
    Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read the upload ──────────────────────────────────────────────────
    let limits = InputLimits {
        download_timeout_secs: cli.download_timeout,
        ..InputLimits::default()
    }
    .with_max_megabytes(cli.max_size_mb)
    .context("Invalid --max-size-mb")?;

    let upload = resolve_input(&cli.input, &limits)
        .await
        .context("Failed to read input")?;

    if !cli.quiet && !cli.json {
        eprintln!("{} {}", cyan("◆"), bold(&upload.name));
        eprintln!("   {}", dim(&format!("{:.2} MB", upload.size_mb())));
    }

    // ── Validate + inspect (pdfium is blocking) ─────────────────────────
    let (upload, report, info) = tokio::task::spawn_blocking(move || inspect_upload(upload))
        .await
        .context("Validation task panicked")?
        .context("PDF engine unavailable")?;

    let estimate = estimate_conversion_time(report.page_count);

    if cli.json && (cli.inspect_only || !report.valid) {
        let json = serde_json::json!({
            "file": upload.name,
            "size_bytes": upload.size_bytes(),
            "validation": report,
            "info": info,
            "estimate": estimate.as_str(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("Failed to serialise report")?
        );
    }

    if let Some(msg) = report.error_message() {
        if !cli.quiet && !cli.json {
            eprintln!("{} {}", red("✘"), msg);
        }
        anyhow::bail!("'{}' was rejected: {}", upload.name, msg);
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "{} Valid PDF, {} page{}",
            green("✔"),
            report.page_count,
            if report.page_count == 1 { "" } else { "s" }
        );
        if let Some(ref info) = info {
            print_info(info);
        }
        eprintln!("   Estimated time: {}", bold(estimate.as_str()));
    }

    if cli.inspect_only {
        return Ok(());
    }

    // ── Convert ──────────────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(output_filename(&upload.name)));
    if output_path.exists() && !cli.force {
        anyhow::bail!(
            "Output file '{}' already exists (use --force to overwrite)",
            output_path.display()
        );
    }

    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress)?;

    let doc = tokio::task::spawn_blocking(move || {
        convert(&upload.bytes, &upload.name, &config)
    })
    .await
    .context("Conversion task panicked")?
    .context("Conversion failed")?;

    write_output(&output_path, &doc.bytes).context("Failed to save DOCX")?;

    if cli.json {
        let json = serde_json::json!({
            "document": doc,
            "path": output_path,
            "size_bytes": doc.size_bytes(),
            "mime_type": doc.mime_type(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {}  {}ms  →  {}",
            green("✔"),
            dim(&format!("{:.2} MB", doc.size_bytes() as f64 / (1024.0 * 1024.0))),
            doc.duration_ms,
            bold(&output_path.display().to_string()),
        );
    }

    Ok(())
}

/// Validate, and read metadata for accepted uploads.
fn inspect_upload(
    upload: Upload,
) -> Result<(Upload, ValidationReport, Option<DocumentInfo>), pdf2docx::Pdf2DocxError> {
    let pdfium = pdfium::shared()?;
    let report = validation::validate(pdfium, &upload.bytes);
    let info = if report.valid {
        metadata::extract_info(pdfium, &upload.bytes)
    } else {
        None
    };
    Ok((upload, report, info))
}

fn print_info(info: &DocumentInfo) {
    if let Some(ref t) = info.title {
        eprintln!("   Title:   {t}");
    }
    if let Some(ref a) = info.author {
        eprintln!("   Author:  {a}");
    }
    if let Some(ref s) = info.subject {
        eprintln!("   Subject: {s}");
    }
    if let Some(ref c) = info.creator {
        eprintln!("   Creator: {c}");
    }
    eprintln!("   Version: {}", info.pdf_version);
}

/// Map CLI args to `ConverterConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConverterConfig> {
    let engine: Arc<dyn ConversionEngine> = match cli.engine {
        EngineArg::Builtin => Arc::new(PdfiumDocxEngine::new().page_breaks(!cli.no_page_breaks)),
        EngineArg::Command => {
            let command_line = cli
                .engine_command
                .as_deref()
                .context("--engine command requires --engine-command")?;
            Arc::new(CommandEngine::parse(command_line).context("Invalid --engine-command")?)
        }
    };

    let mut builder = ConverterConfig::builder().engine(engine);
    if let Some(ref dir) = cli.scratch_dir {
        builder = builder.scratch_dir(dir);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
