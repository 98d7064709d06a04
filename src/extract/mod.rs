//! Text extraction from raw document bytes.
//!
//! One [`DocumentReader`] per supported format. Readers never panic on bad
//! input: a document that cannot be parsed yields an [`ExtractError`] that the
//! caller records before moving on to the next document.

mod docx;
mod pdf;
mod plain_text;

pub use docx::DocxReader;
pub use pdf::PdfReader;
pub use plain_text::PlainTextReader;

use crate::error::ExtractResult;
use crate::models::DocumentKind;

/// Extracts flat text from the bytes of one document.
pub trait DocumentReader: Send + Sync {
    /// Return the document's text.
    fn extract_text(&self, bytes: &[u8]) -> ExtractResult<String>;
}

/// The reader responsible for a document kind.
pub fn reader_for(kind: DocumentKind) -> &'static dyn DocumentReader {
    match kind {
        DocumentKind::PlainText => &PlainTextReader,
        DocumentKind::WordProcessor => &DocxReader,
        DocumentKind::Pdf => &PdfReader,
    }
}

/// Extract text from `bytes` using the reader for `kind`.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> ExtractResult<String> {
    reader_for(kind).extract_text(bytes)
}
