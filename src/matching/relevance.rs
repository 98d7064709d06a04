//! Keyword relevance matching of catalog rows against a customer message.
//!
//! This module provides:
//! - A [`ScoringStrategy`] seam with substring and whole-word implementations
//! - Full-record or name-only matching via [`MatchMode`]
//! - Stable ranking by descending overlap count

use crate::matching::stopwords::{StopwordFilter, TokenSet, WORD_REGEX};
use crate::models::CatalogRecord;
use serde::Serialize;
use std::collections::HashSet;

/// A catalog record annotated with its overlap score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchResult {
    /// The matched catalog row
    pub record: CatalogRecord,

    /// Number of distinct query tokens found in the row (always >= 1)
    pub score: usize,
}

/// Which part of a catalog row is compared against the query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Every field value, flattened into one lowercase string
    #[default]
    FullRecord,

    /// Only the designated name column
    NameOnly { field: String },
}

impl MatchMode {
    /// The lowercase text a record is scored against under this mode.
    pub fn text_for(&self, record: &CatalogRecord) -> String {
        match self {
            Self::FullRecord => record.flattened_text(),
            Self::NameOnly { field } => record
                .get(field)
                .map(|value| value.to_string().to_lowercase())
                .unwrap_or_default(),
        }
    }
}

/// Scores lowercase text against a token set.
pub trait ScoringStrategy: Send + Sync {
    /// Number of tokens considered present in `text`.
    fn score(&self, tokens: &TokenSet, text: &str) -> usize;
}

/// Counts tokens that occur anywhere in the text as a substring.
///
/// "bản" matches inside "nhật bản" as well as inside "phiên bản".
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringOverlap;

impl ScoringStrategy for SubstringOverlap {
    fn score(&self, tokens: &TokenSet, text: &str) -> usize {
        tokens.iter().filter(|token| text.contains(token)).count()
    }
}

/// Counts tokens that equal a whole word of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryOverlap;

impl ScoringStrategy for WordBoundaryOverlap {
    fn score(&self, tokens: &TokenSet, text: &str) -> usize {
        let words: HashSet<&str> = WORD_REGEX.find_iter(text).map(|m| m.as_str()).collect();
        tokens.iter().filter(|token| words.contains(token)).count()
    }
}

/// Ranks catalog rows by keyword overlap with a free-text query.
pub struct RelevanceMatcher {
    filter: StopwordFilter,
    strategy: Box<dyn ScoringStrategy>,
    mode: MatchMode,
    max_results: usize,
}

impl RelevanceMatcher {
    /// Create a matcher with the default stop words, substring scoring and full-record mode.
    pub fn new() -> Self {
        Self {
            filter: StopwordFilter::new(),
            strategy: Box::new(SubstringOverlap),
            mode: MatchMode::FullRecord,
            max_results: 0,
        }
    }

    /// Use a different matching mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a different scoring strategy.
    pub fn with_strategy(mut self, strategy: impl ScoringStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Use a different stop-word filter.
    pub fn with_filter(mut self, filter: StopwordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Cap the number of results (0 = unlimited).
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// The tokenizer used for queries.
    pub fn filter(&self) -> &StopwordFilter {
        &self.filter
    }

    /// Find catalog rows that share at least one token with `query`.
    ///
    /// # Returns
    /// Matches sorted by score (highest first); rows with equal scores keep
    /// their input order. A query with no usable tokens matches nothing.
    pub fn find_matches(&self, records: &[CatalogRecord], query: &str) -> Vec<MatchResult> {
        let tokens = self.filter.tokenize(query);
        self.find_matches_for_tokens(records, &tokens)
    }

    /// Same as [`find_matches`](Self::find_matches) with a pre-computed token set.
    pub fn find_matches_for_tokens(
        &self,
        records: &[CatalogRecord],
        tokens: &TokenSet,
    ) -> Vec<MatchResult> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<MatchResult> = records
            .iter()
            .filter_map(|record| {
                let text = self.mode.text_for(record);
                let score = self.strategy.score(tokens, &text);
                (score > 0).then(|| MatchResult {
                    record: record.clone(),
                    score,
                })
            })
            .collect();

        // sort_by is stable: ties keep catalog order
        results.sort_by(|a, b| b.score.cmp(&a.score));

        if self.max_results > 0 {
            results.truncate(self.max_results);
        }

        tracing::debug!(
            tokens = tokens.len(),
            candidates = records.len(),
            matched = results.len(),
            "Scored catalog records"
        );

        results
    }
}

impl Default for RelevanceMatcher {
    fn default() -> Self {
        Self::new()
    }
}
