pub mod mock_catalog_source;
pub mod mock_document_store;
pub mod mock_language_model;

#[allow(unused_imports)]
pub use mock_catalog_source::MockCatalogSource;
#[allow(unused_imports)]
pub use mock_document_store::MockDocumentStore;
#[allow(unused_imports)]
pub use mock_language_model::MockLanguageModel;
