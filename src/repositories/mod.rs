mod drive_document_store;
mod openai_language_model;
mod sheets_catalog_source;
mod traits;

pub use drive_document_store::DriveDocumentStore;
pub use openai_language_model::OpenAiLanguageModel;
pub use sheets_catalog_source::SheetsCatalogSource;
pub use traits::{CatalogSource, DocumentStore, LanguageModel};
