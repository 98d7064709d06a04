use crate::client::SheetsClient;
use crate::error::StoreResult;
use crate::models::CatalogRecord;
use crate::repositories::traits::CatalogSource;

/// Catalog source backed by a Google Sheets range.
///
/// The first row of the range holds the column names.
pub struct SheetsCatalogSource {
    client: SheetsClient,
    range: String,
}

impl SheetsCatalogSource {
    /// Create a source reading `range` (A1 notation) from each requested sheet.
    pub fn new(client: SheetsClient, range: impl Into<String>) -> Self {
        Self {
            client,
            range: range.into(),
        }
    }
}

impl CatalogSource for SheetsCatalogSource {
    fn fetch_records(&self, catalog_id: &str) -> StoreResult<Vec<CatalogRecord>> {
        self.client.get_records(catalog_id, &self.range)
    }
}
