//! Sales assistant service.
//!
//! Orchestrates the catalog, document store and language model collaborators
//! around the matching, aggregation and windowing core. Every operation is
//! synchronous and performs fresh I/O; nothing is cached between calls.

use crate::context::{ContextWindower, DEFAULT_CONTEXT_RADIUS};
use crate::corpus::CorpusAggregator;
use crate::error::StoreError;
use crate::matching::{MatchMode, MatchResult, RelevanceMatcher, TokenSet};
use crate::models::{CatalogRecord, Corpus, DocumentFailure, EmptyReason, Outcome};
use crate::prompt::PromptComposer;
use crate::repositories::{CatalogSource, DocumentStore, LanguageModel};
use serde::Serialize;
use std::sync::Arc;

/// Identifiers and tuning passed explicitly to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSettings {
    /// Catalog (tour sheet) identifier
    pub catalog_id: String,

    /// Folder of company documents
    pub folder_id: String,

    /// Characters kept on each side of the context anchor
    pub context_radius: usize,

    /// Which part of a catalog row is matched
    pub match_mode: MatchMode,

    /// Maximum suggested tours (0 = unlimited)
    pub max_results: usize,
}

impl AssistantSettings {
    pub fn new(catalog_id: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            folder_id: folder_id.into(),
            context_radius: DEFAULT_CONTEXT_RADIUS,
            match_mode: MatchMode::FullRecord,
            max_results: 0,
        }
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Grounding text selected for a question.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct KnowledgeContext {
    /// The windowed excerpt
    pub text: String,

    /// Term the window is anchored on, `None` for the prefix fallback
    pub anchor: Option<String>,

    /// Window character offsets into the full knowledge text
    pub start: usize,
    pub end: usize,

    /// Length of the full knowledge text in characters
    pub total_chars: usize,

    /// Documents included in the knowledge text
    pub sources: Vec<String>,

    /// Number of catalog rows appended after the documents
    pub catalog_rows: usize,

    /// Documents that could not be read
    pub failures: Vec<DocumentFailure>,

    /// Condition of the document folder ("found", "empty_folder", "source_unavailable")
    pub documents_status: &'static str,

    /// Condition of the tour catalog ("found", "empty_catalog", "source_unavailable")
    pub catalog_status: &'static str,

    /// Store errors of the sources that could not be read
    pub unavailable: Vec<String>,
}

impl KnowledgeContext {
    /// Whether one of the sources failed and the other was used alone.
    pub fn is_partial(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

/// A language-model answer, or the reason there is none.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantReply {
    /// Model answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Why no answer was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Retrieval condition behind the answer ("found", "empty_folder", ...)
    pub context_status: &'static str,

    /// Documents used for grounding
    pub sources: Vec<String>,

    /// Store errors of sources left out of the grounding
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<String>,
}

impl AssistantReply {
    fn failed(error: impl Into<String>, context_status: &'static str) -> Self {
        Self {
            answer: None,
            error: Some(error.into()),
            context_status,
            sources: Vec::new(),
            unavailable: Vec::new(),
        }
    }

    /// Text to show the user: the answer or the error.
    pub fn display_text(&self) -> &str {
        self.answer
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}

/// Sales assistant over a tour catalog and a folder of company documents.
pub struct SalesAssistant {
    catalog: Arc<dyn CatalogSource>,
    aggregator: CorpusAggregator,
    model: Arc<dyn LanguageModel>,
    matcher: RelevanceMatcher,
    windower: ContextWindower,
    composer: PromptComposer,
    settings: AssistantSettings,
}

impl SalesAssistant {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        store: Arc<dyn DocumentStore>,
        model: Arc<dyn LanguageModel>,
        settings: AssistantSettings,
    ) -> Self {
        let matcher = RelevanceMatcher::new()
            .with_mode(settings.match_mode.clone())
            .with_max_results(settings.max_results);

        Self {
            catalog,
            aggregator: CorpusAggregator::new(store),
            model,
            matcher,
            windower: ContextWindower::new(settings.context_radius),
            composer: PromptComposer::new(),
            settings,
        }
    }

    /// Replace the prompt composer.
    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Replace the relevance matcher.
    pub fn with_matcher(mut self, matcher: RelevanceMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    /// Rank catalog tours against a customer message. No model call.
    pub fn suggest_tours(&self, message: &str) -> Outcome<Vec<MatchResult>> {
        let tokens = self.matcher.filter().tokenize(message);
        if tokens.is_empty() {
            return Outcome::Empty(EmptyReason::EmptyQuery);
        }

        let records = match self.catalog.fetch_records(&self.settings.catalog_id) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to fetch tour catalog: {}", e);
                return Outcome::SourceUnavailable(e);
            }
        };

        if records.is_empty() {
            return Outcome::Empty(EmptyReason::EmptyCatalog);
        }

        let matches = self.matcher.find_matches_for_tokens(&records, &tokens);
        if matches.is_empty() {
            Outcome::Empty(EmptyReason::NoMatches)
        } else {
            tracing::info!(matched = matches.len(), "Suggested tours");
            Outcome::Found(matches)
        }
    }

    /// Gather company documents plus the catalog and window them around `question`.
    ///
    /// The catalog is appended after the documents, one line per tour. If only
    /// one of the two sources is reachable, the other is used alone.
    pub fn knowledge_context(&self, question: &str) -> Outcome<KnowledgeContext> {
        let documents = self.aggregator.aggregate(&self.settings.folder_id);
        let catalog = self.catalog.fetch_records(&self.settings.catalog_id);

        let documents_status = documents.status();
        let (corpus, documents_error) = match documents {
            Outcome::Found(corpus) => (Some(corpus), None),
            Outcome::Empty(_) => (None, None),
            Outcome::SourceUnavailable(e) => {
                tracing::warn!("Document folder unavailable, using catalog only: {}", e);
                (None, Some(e))
            }
        };

        let (records, catalog_error) = match catalog {
            Ok(records) => (records, None),
            Err(e) => {
                tracing::warn!("Tour catalog unavailable, using documents only: {}", e);
                (Vec::new(), Some(e))
            }
        };
        let catalog_status = match (&catalog_error, records.is_empty()) {
            (Some(_), _) => "source_unavailable",
            (None, true) => "empty_catalog",
            (None, false) => "found",
        };

        if corpus.is_none() && records.is_empty() {
            return match first_error(documents_error, catalog_error) {
                Some(e) => Outcome::SourceUnavailable(e),
                None => Outcome::Empty(EmptyReason::EmptyFolder),
            };
        }

        let unavailable: Vec<String> = [("documents", documents_error), ("catalog", catalog_error)]
            .into_iter()
            .filter_map(|(source, error)| error.map(|e| format!("{}: {}", source, e)))
            .collect();

        let corpus = corpus.unwrap_or_default();
        let knowledge = knowledge_text(&corpus, &records);
        let tokens = self.matcher.filter().tokenize(question);

        let (window, anchor) = anchor_candidates(question, &tokens)
            .into_iter()
            .map(|candidate| (self.windower.window(&knowledge, &candidate), candidate))
            .find(|(window, _)| window.found)
            .map(|(window, candidate)| (window, Some(candidate)))
            .unwrap_or_else(|| (self.windower.window(&knowledge, ""), None));

        tracing::debug!(
            anchor = anchor.as_deref().unwrap_or("<prefix>"),
            start = window.start,
            end = window.end,
            "Selected knowledge window"
        );

        Outcome::Found(KnowledgeContext {
            text: window.text.to_string(),
            anchor,
            start: window.start,
            end: window.end,
            total_chars: knowledge.chars().count(),
            sources: corpus.sources,
            catalog_rows: records.len(),
            failures: corpus.failures,
            documents_status,
            catalog_status,
            unavailable,
        })
    }

    /// Build the grounded prompt for `question` without calling the model.
    pub fn compose_company_prompt(&self, question: &str) -> Outcome<String> {
        self.knowledge_context(question)
            .map(|context| self.composer.compose_text(&context.text, question))
    }

    /// Answer a question from company data.
    pub fn ask_company(&self, question: &str) -> AssistantReply {
        if question.trim().is_empty() {
            return AssistantReply::failed("Câu hỏi trống", "empty_query");
        }

        let outcome = self.knowledge_context(question);
        let status = outcome.status();

        let context = match outcome {
            Outcome::Found(context) => context,
            Outcome::Empty(_) => KnowledgeContext::default(),
            Outcome::SourceUnavailable(e) => {
                return AssistantReply::failed(
                    format!("Không truy cập được dữ liệu công ty: {}", e),
                    status,
                );
            }
        };

        let status = if context.is_partial() { "partial" } else { status };
        let prompt = self.composer.compose_text(&context.text, question);
        let mut reply = self.complete(&prompt, status, context.sources);
        reply.unavailable = context.unavailable;
        reply
    }

    /// Three professional ways to handle a customer objection. No retrieval.
    pub fn handle_objection(&self, message: &str) -> AssistantReply {
        if message.trim().is_empty() {
            return AssistantReply::failed("Tin nhắn khách trống", "empty_query");
        }

        let prompt = self.composer.objection_prompt(message);
        self.complete(&prompt, "not_used", Vec::new())
    }

    /// Compare two tours from company data.
    pub fn compare_tours(&self, first: &str, second: &str) -> AssistantReply {
        if first.trim().is_empty() || second.trim().is_empty() {
            return AssistantReply::failed("Cần nhập đủ tên 2 tour", "empty_query");
        }

        self.ask_company(&self.composer.comparison_question(first, second))
    }

    /// Visa requirements for a nationality travelling to a destination.
    pub fn visa_requirements(&self, nationality: &str, destination: &str) -> AssistantReply {
        if nationality.trim().is_empty() || destination.trim().is_empty() {
            return AssistantReply::failed("Cần nhập quốc tịch và điểm đến", "empty_query");
        }

        self.ask_company(&self.composer.visa_question(nationality, destination))
    }

    fn complete(&self, prompt: &str, status: &'static str, sources: Vec<String>) -> AssistantReply {
        match self.model.complete(self.composer.system_message(), prompt) {
            Ok(answer) => AssistantReply {
                answer: Some(answer),
                error: None,
                context_status: status,
                sources,
                unavailable: Vec::new(),
            },
            Err(e) => {
                tracing::error!("Language model call failed: {}", e);
                AssistantReply {
                    answer: None,
                    error: Some(e.to_string()),
                    context_status: status,
                    sources,
                    unavailable: Vec::new(),
                }
            }
        }
    }
}

fn first_error(documents: Option<StoreError>, catalog: Option<StoreError>) -> Option<StoreError> {
    documents.or(catalog)
}

/// Document text followed by one `column: value | ...` line per catalog row.
fn knowledge_text(corpus: &Corpus, records: &[CatalogRecord]) -> String {
    let mut text = corpus.text.clone();
    for record in records {
        text.push_str(&record.to_line());
        text.push('\n');
    }
    text
}

/// Window anchors to try in order: the whole question, then its tokens in
/// order of appearance.
fn anchor_candidates(question: &str, tokens: &TokenSet) -> Vec<String> {
    let lowered = question.to_lowercase();
    let mut ordered: Vec<(usize, &str)> = tokens
        .iter()
        .map(|token| (lowered.find(token).unwrap_or(usize::MAX), token))
        .collect();
    ordered.sort();

    let mut candidates = Vec::with_capacity(ordered.len() + 1);
    if !question.trim().is_empty() {
        candidates.push(question.trim().to_string());
    }
    candidates.extend(ordered.into_iter().map(|(_, token)| token.to_string()));
    candidates
}
