//! End-to-end tests for pdf2docx against the real pdfium library.
//!
//! The PDFs are assembled in-process (see `PdfBuilder`) so no fixtures are
//! needed. Every test that touches pdfium skips itself when the library
//! cannot be bound.
//!
//! Run with:
//!   PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

use pdf2docx::pipeline::{metadata, pdfium as binding, validate as validation};
use pdf2docx::{
    convert, output_filename, write_output, ConverterConfig, Pdf2DocxError, PdfiumDocxEngine,
    ValidationError,
};
use pdfium_render::prelude::Pdfium;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// The shared pdfium instance, or print SKIP and return `None`.
fn pdfium_or_skip() -> Option<&'static Pdfium> {
    match binding::shared() {
        Ok(p) => Some(p),
        Err(e) => {
            println!("SKIP — pdfium unavailable: {e}");
            None
        }
    }
}

macro_rules! require_pdfium {
    () => {
        match pdfium_or_skip() {
            Some(p) => p,
            None => return,
        }
    };
}

/// Minimal PDF writer: numbered objects, a classic xref table and a trailer.
struct PdfBuilder {
    objects: Vec<String>,
    trailer_extra: String,
}

impl PdfBuilder {
    fn new() -> Self {
        Self {
            objects: Vec::new(),
            trailer_extra: String::new(),
        }
    }

    /// Add an object; returns its object number.
    fn add(&mut self, body: impl Into<String>) -> usize {
        self.objects.push(body.into());
        self.objects.len()
    }

    fn set(&mut self, num: usize, body: impl Into<String>) {
        self.objects[num - 1] = body.into();
    }

    fn trailer(&mut self, extra: &str) {
        self.trailer_extra.push(' ');
        self.trailer_extra.push_str(extra);
    }

    fn build(&self) -> Vec<u8> {
        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", self.objects.len() + 1);
        for off in offsets {
            xref.push_str(&format!("{off:010} 00000 n \n"));
        }
        out.extend_from_slice(xref.as_bytes());
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R{} >>\nstartxref\n{}\n%%EOF\n",
                self.objects.len() + 1,
                self.trailer_extra,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }
}

/// A PDF with one page per entry in `pages`, each showing that text.
fn text_pdf_builder(pages: &[&str]) -> PdfBuilder {
    let mut b = PdfBuilder::new();
    let catalog = b.add("<< /Type /Catalog /Pages 2 0 R >>");
    assert_eq!(catalog, 1);
    let pages_obj = b.add(String::new());
    let font = b.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");

    let mut kids = Vec::new();
    for text in pages {
        let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        let content_obj = b.add(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
        let page = b.add(format!(
            "<< /Type /Page /Parent {pages_obj} 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {font} 0 R >> >> /Contents {content_obj} 0 R >>"
        ));
        kids.push(format!("{page} 0 R"));
    }
    b.set(
        pages_obj,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    );
    b
}

fn text_pdf(pages: &[&str]) -> Vec<u8> {
    text_pdf_builder(pages).build()
}

/// A one-page PDF with an info dictionary.
fn pdf_with_info(title: &str, author: &str) -> Vec<u8> {
    let mut b = text_pdf_builder(&["Body text"]);
    let info = b.add(format!("<< /Title ({title}) /Author ({author}) /Producer () >>"));
    b.trailer(&format!("/Info {info} 0 R"));
    b.build()
}

/// A one-page PDF protected by the standard security handler. The user
/// password check fails for the empty password, so opening needs a password.
fn encrypted_pdf() -> Vec<u8> {
    let mut b = text_pdf_builder(&["Secret"]);
    let o = "A5".repeat(32);
    let u = "3C".repeat(32);
    let encrypt = b.add(format!(
        "<< /Filter /Standard /V 1 /R 2 /O <{o}> /U <{u}> /P -44 >>"
    ));
    let id = "0123456789ABCDEF0123456789ABCDEF";
    b.trailer(&format!("/Encrypt {encrypt} 0 R /ID [<{id}> <{id}>]"));
    b.build()
}

/// A structurally valid PDF whose page tree is empty.
fn zero_page_pdf() -> Vec<u8> {
    let mut b = PdfBuilder::new();
    b.add("<< /Type /Catalog /Pages 2 0 R >>");
    b.add("<< /Type /Pages /Kids [] /Count 0 >>");
    b.build()
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).expect("DOCX is a ZIP container");
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .expect("word/document.xml present")
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

// ── Builder sanity (no pdfium) ───────────────────────────────────────────────

#[test]
fn test_builder_emits_header_and_trailer() {
    let bytes = text_pdf(&["Hello"]);
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert_eq!(validation::find_pdf_header(&bytes), Some(0));
}

// ── Validator ────────────────────────────────────────────────────────────────

#[test]
fn test_validate_single_page() {
    let pdfium = require_pdfium!();
    let report = validation::validate(pdfium, &text_pdf(&["Hello World"]));
    assert!(report.valid, "unexpected rejection: {:?}", report.error);
    assert_eq!(report.page_count, 1);
    assert!(report.error.is_none());
}

#[test]
fn test_validate_reports_true_page_count() {
    let pdfium = require_pdfium!();
    let report = validation::validate(pdfium, &text_pdf(&["one", "two", "three", "four", "five"]));
    assert!(report.valid, "unexpected rejection: {:?}", report.error);
    assert_eq!(report.page_count, 5);
}

#[test]
fn test_validate_rejects_encrypted() {
    let pdfium = require_pdfium!();
    let report = validation::validate(pdfium, &encrypted_pdf());
    assert!(!report.valid);
    assert_eq!(report.error, Some(ValidationError::Encrypted));
    assert_eq!(report.page_count, 0);
}

#[test]
fn test_validate_rejects_zero_pages() {
    let pdfium = require_pdfium!();
    let report = validation::validate(pdfium, &zero_page_pdf());
    assert!(!report.valid);
    assert_eq!(report.error, Some(ValidationError::Empty));
    assert_eq!(report.page_count, 0);
}

#[test]
fn test_validate_rejects_non_pdf() {
    let pdfium = require_pdfium!();
    for bytes in [&b""[..], b"hello world", b"PK\x03\x04 zip archive"] {
        let report = validation::validate(pdfium, bytes);
        assert!(!report.valid);
        assert_eq!(report.page_count, 0);
        assert!(matches!(report.error, Some(ValidationError::Malformed { .. })));
    }
}

#[test]
fn test_validate_rejects_truncated_pdf() {
    let pdfium = require_pdfium!();
    let report = validation::validate(pdfium, b"%PDF-1.4\n1 0 obj\n<< /Type");
    assert!(!report.valid);
    assert_eq!(report.page_count, 0);
    assert!(matches!(report.error, Some(ValidationError::Malformed { .. })));
    let message = report.error_message().unwrap();
    assert!(!message.contains("PdfiumLibraryInternalError"), "got: {message}");
    assert!(!message.contains("FormatError"), "got: {message}");
}

// ── Info extractor ───────────────────────────────────────────────────────────

#[test]
fn test_extract_info_reads_title_and_author() {
    let pdfium = require_pdfium!();
    let info = metadata::extract_info(pdfium, &pdf_with_info("Quarterly Report", "Jane Doe"))
        .expect("info should be available");
    assert_eq!(info.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(info.author.as_deref(), Some("Jane Doe"));
    assert_eq!(info.producer, None, "empty fields map to None");
    assert_eq!(info.page_count, 1);
}

#[test]
fn test_extract_info_without_info_dictionary() {
    let pdfium = require_pdfium!();
    let info = metadata::extract_info(pdfium, &text_pdf(&["x"])).expect("parseable");
    assert_eq!(info.title, None);
    assert_eq!(info.author, None);
}

#[test]
fn test_extract_info_on_garbage_is_none() {
    let pdfium = require_pdfium!();
    assert!(metadata::extract_info(pdfium, b"not a pdf at all").is_none());
}

// ── Converter with the built-in engine ──────────────────────────────────────

#[test]
fn test_convert_produces_docx_and_leaves_no_temp_files() {
    let _pdfium = require_pdfium!();
    let scratch = tempfile::tempdir().unwrap();
    let config = ConverterConfig::builder()
        .scratch_dir(scratch.path())
        .build()
        .unwrap();

    let doc = convert(&text_pdf(&["First page", "Second page"]), "report.pdf", &config)
        .expect("conversion should succeed");

    assert_eq!(doc.file_name, "report_converted.docx");
    assert_eq!(doc.engine, "pdfium-docx");
    assert_eq!(&doc.bytes[..2], b"PK");

    let xml = document_xml(&doc.bytes);
    assert!(xml.contains("First page"), "document.xml: {xml}");
    assert!(xml.contains("Second page"));

    assert!(is_empty_dir(scratch.path()), "scratch files left behind");
}

#[test]
fn test_convert_without_page_breaks() {
    let _pdfium = require_pdfium!();
    let scratch = tempfile::tempdir().unwrap();
    let config = ConverterConfig::builder()
        .engine(Arc::new(PdfiumDocxEngine::new().page_breaks(false)))
        .scratch_dir(scratch.path())
        .build()
        .unwrap();

    let doc = convert(&text_pdf(&["a", "b"]), "two.pdf", &config).unwrap();
    assert!(!document_xml(&doc.bytes).contains(r#"w:type="page""#));
}

#[test]
fn test_convert_corrupted_buffer_fails_cleanly() {
    let _pdfium = require_pdfium!();
    let scratch = tempfile::tempdir().unwrap();
    let config = ConverterConfig::builder()
        .scratch_dir(scratch.path())
        .build()
        .unwrap();

    let result = convert(b"%PDF-1.7\nthis is not really a pdf", "broken.pdf", &config);
    match result {
        Err(Pdf2DocxError::ConversionFailed { detail }) => assert!(!detail.is_empty()),
        other => panic!("expected ConversionFailed, got {other:?}"),
    }
    assert!(is_empty_dir(scratch.path()), "scratch files left behind");
}

#[test]
fn test_convert_encrypted_fails_cleanly() {
    let _pdfium = require_pdfium!();
    let scratch = tempfile::tempdir().unwrap();
    let config = ConverterConfig::builder()
        .scratch_dir(scratch.path())
        .build()
        .unwrap();

    let err = convert(&encrypted_pdf(), "secret.pdf", &config).unwrap_err();
    assert!(err.to_string().contains("password"), "got: {err}");
    assert!(is_empty_dir(scratch.path()));
}

#[test]
fn test_concurrent_conversions_share_pdfium() {
    let pdfium = require_pdfium!();
    let scratch = tempfile::tempdir().unwrap();
    let config = ConverterConfig::builder()
        .scratch_dir(scratch.path())
        .build()
        .unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|i| {
                let config = &config;
                s.spawn(move || {
                    let text = format!("Worker {i}");
                    let bytes = text_pdf(&[text.as_str(), "tail"]);
                    let doc = convert(&bytes, &format!("w{i}.pdf"), config).unwrap();
                    (text, doc)
                })
            })
            .collect();
        for handle in handles {
            let (text, doc) = handle.join().expect("worker panicked");
            assert!(document_xml(&doc.bytes).contains(&text));
        }
    });

    // The shared instance is still usable afterwards.
    assert!(validation::validate(pdfium, &text_pdf(&["after"])).valid);
    assert!(is_empty_dir(scratch.path()));
}

// ── Full request flow ────────────────────────────────────────────────────────

#[test]
fn test_upload_validate_convert_save() {
    let pdfium = require_pdfium!();
    let bytes = pdf_with_info("Flow", "Tester");

    let report = validation::validate(pdfium, &bytes);
    assert!(report.valid);
    let info = metadata::extract_info(pdfium, &bytes).unwrap();
    assert_eq!(info.title.as_deref(), Some("Flow"));

    let scratch = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let config = ConverterConfig::builder()
        .scratch_dir(scratch.path())
        .build()
        .unwrap();

    let doc = convert(&bytes, "Flow.PDF", &config).unwrap();
    assert_eq!(doc.file_name, output_filename("Flow.PDF"));

    let path = out_dir.path().join(&doc.file_name);
    write_output(&path, &doc.bytes).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), doc.bytes);
    assert!(is_empty_dir(scratch.path()));
}
