//! Best-effort metadata extraction.

use crate::output::DocumentInfo;
use pdfium_render::prelude::*;
use tracing::debug;

/// Read the document info dictionary.
///
/// Returns `None` when the bytes cannot be opened; this never fails.
pub fn extract_info(pdfium: &Pdfium, bytes: &[u8]) -> Option<DocumentInfo> {
    let document = match pdfium.load_pdf_from_byte_slice(bytes, None) {
        Ok(doc) => doc,
        Err(e) => {
            debug!("Metadata unavailable: {:?}", e);
            return None;
        }
    };

    let metadata = document.metadata();
    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().trim().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Some(DocumentInfo {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
