//! Google Drive v3 client: folder listing and document download.

use super::ApiClient;
use crate::error::StoreResult;
use crate::models::RemoteFile;
use serde::Deserialize;

/// Files requested per listing page.
const PAGE_SIZE: &str = "100";

/// One page of a `files.list` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListPage {
    #[serde(default)]
    files: Vec<RemoteFile>,

    #[serde(default)]
    next_page_token: Option<String>,
}

/// Client for listing and downloading files from a Drive folder.
#[derive(Clone)]
pub struct DriveClient {
    api: ApiClient,
}

impl DriveClient {
    /// Create a DriveClient over a configured ApiClient.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get the underlying ApiClient.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// List every non-trashed file directly inside `folder_id`, following pagination.
    pub fn list_folder(&self, folder_id: &str) -> StoreResult<Vec<RemoteFile>> {
        let query = format!(
            "'{}' in parents and trashed = false",
            folder_id.replace('\\', "\\\\").replace('\'', "\\'")
        );

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("q", query.as_str()),
                ("fields", "nextPageToken, files(id, name, mimeType)"),
                ("orderBy", "name"),
                ("pageSize", PAGE_SIZE),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let response = self.api.get("/files", &params)?;
            let body = ApiClient::read_string(response)?;
            let page: FileListPage = serde_json::from_str(&body)?;

            tracing::debug!(
                folder = %folder_id,
                count = page.files.len(),
                "Fetched folder listing page"
            );
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        self.api.metrics().record_files_listed(files.len());
        Ok(files)
    }

    /// Download a file's content. Native Google Docs are exported as plain text.
    pub fn download(&self, file: &RemoteFile) -> StoreResult<Vec<u8>> {
        let response = if file.is_google_doc() {
            self.api.get(
                &format!("/files/{}/export", urlencoding::encode(&file.id)),
                &[("mimeType", "text/plain")],
            )?
        } else {
            self.api.get(
                &format!("/files/{}", urlencoding::encode(&file.id)),
                &[("alt", "media")],
            )?
        };

        let bytes = ApiClient::read_bytes(response)?;
        self.api.metrics().record_document_downloaded();
        tracing::debug!(file = %file.name, bytes = bytes.len(), "Downloaded document");
        Ok(bytes)
    }
}
