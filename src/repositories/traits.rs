use crate::error::{LlmResult, StoreResult};
use crate::models::{CatalogRecord, RemoteFile};

/// Source of catalog records (one record per sellable tour).
///
/// Implementations return records in catalog order; the core never mutates them.
pub trait CatalogSource: Send + Sync {
    /// Fetch every record of the catalog identified by `catalog_id`.
    fn fetch_records(&self, catalog_id: &str) -> StoreResult<Vec<CatalogRecord>>;
}

/// Remote folder of company documents.
pub trait DocumentStore: Send + Sync {
    /// List the files directly inside `folder_id`.
    ///
    /// An inaccessible folder is an error, never an empty listing.
    fn list_files(&self, folder_id: &str) -> StoreResult<Vec<RemoteFile>>;

    /// Download the raw bytes of one listed file.
    fn fetch(&self, file: &RemoteFile) -> StoreResult<Vec<u8>>;
}

/// Text-completion collaborator; responses are opaque text.
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt` under the given system instruction.
    fn complete(&self, system: &str, prompt: &str) -> LlmResult<String>;
}
