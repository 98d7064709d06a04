use crate::extract;
use crate::models::{Corpus, DocumentFailure, EmptyReason, Outcome, RemoteFile, SkippedFile};
use crate::repositories::DocumentStore;
use std::sync::Arc;

/// Builds a [`Corpus`] from every readable document in a folder.
///
/// Documents are processed one at a time in a deterministic order (file name,
/// then id). A document that cannot be downloaded or parsed contributes empty
/// text and is recorded in [`Corpus::failures`]; it never aborts the run.
/// Nothing is cached between calls.
pub struct CorpusAggregator {
    store: Arc<dyn DocumentStore>,
}

impl CorpusAggregator {
    /// Create a new CorpusAggregator over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch and concatenate the text of every supported document in `folder_id`.
    ///
    /// Returns `SourceUnavailable` when the folder cannot be listed and
    /// `Empty(EmptyFolder)` when it has no files at all.
    pub fn aggregate(&self, folder_id: &str) -> Outcome<Corpus> {
        let mut files = match self.store.list_files(folder_id) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(folder = %folder_id, "Failed to list document folder: {}", e);
                return Outcome::SourceUnavailable(e);
            }
        };

        if files.is_empty() {
            tracing::info!(folder = %folder_id, "Document folder is empty");
            return Outcome::Empty(EmptyReason::EmptyFolder);
        }

        files.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut corpus = Corpus::default();
        for file in &files {
            self.add_file(&mut corpus, file);
        }

        tracing::info!(
            folder = %folder_id,
            included = corpus.sources.len(),
            skipped = corpus.skipped.len(),
            failed = corpus.failures.len(),
            chars = corpus.text.chars().count(),
            "Aggregated document corpus"
        );

        Outcome::Found(corpus)
    }

    fn add_file(&self, corpus: &mut Corpus, file: &RemoteFile) {
        let Some(kind) = file.kind() else {
            tracing::debug!(file = %file.name, "Skipping unsupported document format");
            corpus.skipped.push(SkippedFile {
                id: file.id.clone(),
                name: file.name.clone(),
            });
            return;
        };

        let text = self
            .store
            .fetch(file)
            .map_err(|e| e.to_string())
            .and_then(|bytes| extract::extract_text(kind, &bytes).map_err(|e| e.to_string()));

        match text {
            Ok(text) => {
                tracing::debug!(file = %file.name, chars = text.chars().count(), "Read document");
                corpus.append(file.name.clone(), &text);
            }
            Err(reason) => {
                tracing::warn!(file = %file.name, "Skipping unreadable document: {}", reason);
                corpus.record_failure(DocumentFailure {
                    id: file.id.clone(),
                    name: file.name.clone(),
                    reason,
                });
            }
        }
    }
}
