use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tour_sales_assistant::error::{StoreError, StoreResult};
use tour_sales_assistant::models::RemoteFile;
use tour_sales_assistant::repositories::DocumentStore;

/// Mock document folder for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDocumentStore {
    files: Arc<Mutex<Vec<RemoteFile>>>,
    contents: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    forbidden: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, id: &str, name: &str, bytes: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .push(RemoteFile::new(id, name, "application/octet-stream"));
        self.contents
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
    }

    pub fn add_text_file(&self, id: &str, name: &str, text: &str) {
        self.add_file(id, name, text.as_bytes());
    }

    pub fn set_forbidden(&self, forbidden: bool) {
        *self.forbidden.lock().unwrap() = forbidden;
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

impl DocumentStore for MockDocumentStore {
    fn list_files(&self, folder_id: &str) -> StoreResult<Vec<RemoteFile>> {
        self.track_call("list_files");
        if *self.forbidden.lock().unwrap() {
            return Err(StoreError::Forbidden(format!("folder {}", folder_id)));
        }
        Ok(self.files.lock().unwrap().clone())
    }

    fn fetch(&self, file: &RemoteFile) -> StoreResult<Vec<u8>> {
        self.track_call("fetch");
        self.contents
            .lock()
            .unwrap()
            .get(&file.id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(file.id.clone()))
    }
}
