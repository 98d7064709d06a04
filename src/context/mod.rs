//! Bounded excerpts of a corpus around the first occurrence of a query.

mod window;

pub use window::{window, ContextWindow, ContextWindower, DEFAULT_CONTEXT_RADIUS};
