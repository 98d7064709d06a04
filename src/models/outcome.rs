//! Typed results for lookups that must never fail outright.
//!
//! Matching and retrieval always yield a usable default for the caller, but
//! the condition that produced an empty answer is kept: "nothing matched" and
//! "the store could not be reached" are different values.

use crate::error::StoreError;
use serde::Serialize;

/// Why a lookup produced no data even though nothing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The query contained no usable tokens
    EmptyQuery,

    /// The catalog has no rows
    EmptyCatalog,

    /// Rows were scored but none overlapped the query
    NoMatches,

    /// The document folder has no files
    EmptyFolder,
}

/// Result of a lookup against an external source.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Data was found
    Found(T),

    /// The source answered but there was nothing to return
    Empty(EmptyReason),

    /// The source could not be reached or refused access
    SourceUnavailable(StoreError),
}

impl<T> Outcome<T> {
    /// Whether data was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrow the found value, if any.
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Consume into the found value, if any.
    pub fn into_found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the found value, keeping the other conditions.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Found(value) => Outcome::Found(f(value)),
            Self::Empty(reason) => Outcome::Empty(reason),
            Self::SourceUnavailable(err) => Outcome::SourceUnavailable(err),
        }
    }

    /// Short machine-readable label for the condition.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Empty(EmptyReason::EmptyQuery) => "empty_query",
            Self::Empty(EmptyReason::EmptyCatalog) => "empty_catalog",
            Self::Empty(EmptyReason::NoMatches) => "no_matches",
            Self::Empty(EmptyReason::EmptyFolder) => "empty_folder",
            Self::SourceUnavailable(_) => "source_unavailable",
        }
    }
}

impl<T: Default> Outcome<T> {
    /// The found value, or the type's empty default for every other condition.
    pub fn unwrap_or_default(self) -> T {
        self.into_found().unwrap_or_default()
    }
}
