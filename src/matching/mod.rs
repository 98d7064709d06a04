//! Keyword matching of customer messages against the tour catalog.
//!
//! This module provides query tokenization with stop-word removal and
//! overlap-count ranking of catalog rows.

pub mod relevance;
pub mod stopwords;

pub use relevance::{
    MatchMode, MatchResult, RelevanceMatcher, ScoringStrategy, SubstringOverlap,
    WordBoundaryOverlap,
};
pub use stopwords::{StopwordFilter, TokenSet, DEFAULT_STOPWORDS};
