//! Aggregation of a folder of heterogeneous documents into one text corpus.

mod aggregator;

pub use aggregator::CorpusAggregator;
