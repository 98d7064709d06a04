//! Google Sheets v4 client reading a catalog range as records.

use super::ApiClient;
use crate::error::StoreResult;
use crate::models::{CatalogRecord, CellValue};
use serde::Deserialize;

/// Response of `spreadsheets.values.get`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    /// Absent when the range is empty
    #[serde(default)]
    values: Vec<Vec<CellValue>>,
}

/// Client for reading catalog rows from a spreadsheet.
#[derive(Clone)]
pub struct SheetsClient {
    api: ApiClient,
}

impl SheetsClient {
    /// Create a SheetsClient over a configured ApiClient.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get the underlying ApiClient.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch the raw rows of `range` in `spreadsheet_id`.
    pub fn get_values(&self, spreadsheet_id: &str, range: &str) -> StoreResult<Vec<Vec<CellValue>>> {
        let path = format!(
            "/spreadsheets/{}/values/{}",
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range)
        );

        let response = self.api.get(&path, &[("majorDimension", "ROWS")])?;
        let body = ApiClient::read_string(response)?;
        let value_range: ValueRange = serde_json::from_str(&body)?;

        Ok(value_range.values)
    }

    /// Fetch `range` and turn it into records keyed by the header row.
    ///
    /// Formatted numeric strings such as `"35000000"` are read back as numbers.
    pub fn get_records(&self, spreadsheet_id: &str, range: &str) -> StoreResult<Vec<CatalogRecord>> {
        let mut rows = self.get_values(spreadsheet_id, range)?.into_iter();

        let Some(headers) = rows.next() else {
            return Ok(Vec::new());
        };

        let data: Vec<Vec<CellValue>> = rows
            .map(|row| row.into_iter().map(CellValue::numericise).collect())
            .collect();

        let records = CatalogRecord::from_rows(&headers, data);
        self.api.metrics().record_records_fetched(records.len());
        tracing::debug!(sheet = %spreadsheet_id, count = records.len(), "Fetched catalog records");
        Ok(records)
    }
}
