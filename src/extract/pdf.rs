//! PDF text extraction using the pure-Rust `pdf-extract` crate.

use super::DocumentReader;
use crate::error::{ExtractError, ExtractResult};
use std::panic;

/// Reads the text layer of PDF documents, page by page.
///
/// Pages without a text layer (scanned images) contribute an empty line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Extract each page's text in page order.
    pub fn extract_pages(&self, bytes: &[u8]) -> ExtractResult<Vec<String>> {
        // pdf-extract can panic on malformed input instead of returning an error
        let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
            Err(_) => Err(ExtractError::Pdf("parser panicked on malformed input".to_string())),
        }
    }
}

impl DocumentReader for PdfReader {
    fn extract_text(&self, bytes: &[u8]) -> ExtractResult<String> {
        let pages = self.extract_pages(bytes)?;
        tracing::debug!(pages = pages.len(), "Extracted PDF text");
        Ok(pages.join("\n"))
    }
}
