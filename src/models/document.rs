//! Remote document and corpus models.

use serde::{Deserialize, Serialize};

/// MIME type of native Google Docs, which the store exports as plain text.
pub const GOOGLE_DOC_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// A file listed in a remote folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteFile {
    /// Store-assigned identifier
    pub id: String,

    /// Display name including extension
    pub name: String,

    /// MIME type reported by the store
    pub mime_type: String,
}

impl RemoteFile {
    /// Create a new RemoteFile.
    pub fn new(id: impl Into<String>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Whether this is a native Google Doc (no binary content to download).
    pub fn is_google_doc(&self) -> bool {
        self.mime_type == GOOGLE_DOC_MIME_TYPE
    }

    /// The reader variant for this file, or `None` when the format is unsupported.
    pub fn kind(&self) -> Option<DocumentKind> {
        if self.is_google_doc() {
            return Some(DocumentKind::PlainText);
        }
        DocumentKind::from_file_name(&self.name)
    }
}

/// Document formats the extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// UTF-8 text
    PlainText,

    /// Office Open XML word-processor document
    WordProcessor,

    /// Portable Document Format
    Pdf,
}

impl DocumentKind {
    /// Determine the kind from a file extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;

        match extension.to_ascii_lowercase().as_str() {
            "txt" | "text" | "md" => Some(Self::PlainText),
            "docx" => Some(Self::WordProcessor),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// A listed file that was not read because its format is unsupported.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedFile {
    pub id: String,
    pub name: String,
}

/// A recognized file that contributed no text because it could not be fetched or parsed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentFailure {
    pub id: String,
    pub name: String,
    pub reason: String,
}

/// Text aggregated from a folder of documents.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Concatenated document text, one `\n` after each supported document.
    /// A document that fails contributes empty text and its `\n`.
    pub text: String,

    /// Names of files whose text was included, in concatenation order
    pub sources: Vec<String>,

    /// Files skipped for unsupported format
    pub skipped: Vec<SkippedFile>,

    /// Files that failed to download or parse
    pub failures: Vec<DocumentFailure>,
}

impl Corpus {
    /// Append one document's text followed by a separating newline.
    pub fn append(&mut self, source: impl Into<String>, text: &str) {
        self.text.push_str(text);
        self.text.push('\n');
        self.sources.push(source.into());
    }

    /// Record a document that could not be read; it contributes only its separator.
    pub fn record_failure(&mut self, failure: DocumentFailure) {
        self.text.push('\n');
        self.failures.push(failure);
    }

    /// Whether no document text was gathered.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
