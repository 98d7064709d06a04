use super::DocumentReader;
use crate::error::{ExtractError, ExtractResult};

/// Reads UTF-8 text files verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn extract_text(&self, bytes: &[u8]) -> ExtractResult<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Encoding(e.to_string()))
    }
}
