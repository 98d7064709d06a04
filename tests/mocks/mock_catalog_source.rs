use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tour_sales_assistant::error::{StoreError, StoreResult};
use tour_sales_assistant::models::CatalogRecord;
use tour_sales_assistant::repositories::CatalogSource;

/// Mock catalog source for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCatalogSource {
    records: Arc<Mutex<Vec<CatalogRecord>>>,
    unavailable: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CatalogRecord>) -> Self {
        let source = Self::new();
        *source.records.lock().unwrap() = records;
        source
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl CatalogSource for MockCatalogSource {
    fn fetch_records(&self, _catalog_id: &str) -> StoreResult<Vec<CatalogRecord>> {
        self.track_call("fetch_records");
        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::Unauthorized);
        }
        Ok(self.records.lock().unwrap().clone())
    }
}
