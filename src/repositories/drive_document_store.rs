use crate::client::DriveClient;
use crate::error::StoreResult;
use crate::models::RemoteFile;
use crate::repositories::traits::DocumentStore;

/// Document store backed by a Google Drive folder.
pub struct DriveDocumentStore {
    client: DriveClient,
}

impl DriveDocumentStore {
    /// Create a new DriveDocumentStore with the given client.
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }
}

impl DocumentStore for DriveDocumentStore {
    fn list_files(&self, folder_id: &str) -> StoreResult<Vec<RemoteFile>> {
        self.client.list_folder(folder_id)
    }

    fn fetch(&self, file: &RemoteFile) -> StoreResult<Vec<u8>> {
        self.client.download(file)
    }
}
