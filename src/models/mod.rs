//! Data models for catalog rows, remote documents and lookup outcomes.

pub mod catalog;
pub mod document;
pub mod outcome;

pub use catalog::{CatalogRecord, CellValue};
pub use document::{
    Corpus, DocumentFailure, DocumentKind, RemoteFile, SkippedFile, GOOGLE_DOC_MIME_TYPE,
};
pub use outcome::{EmptyReason, Outcome};
