//! Tour Sales Assistant - keyword tour matching and document-grounded answers
//! for travel sales staff, served over the Model Context Protocol.
//!
//! # Architecture
//!
//! - **matching**: stop-word tokenization and keyword relevance ranking of catalog rows
//! - **extract**: text extraction from plain text, .docx and PDF bytes
//! - **corpus**: aggregation of a document folder into one corpus
//! - **context**: bounded excerpts around the first occurrence of a query
//! - **prompt**: instruction templates for the language model
//! - **models**: catalog records, remote files and typed lookup outcomes
//! - **error**: custom error types for precise error handling
//! - **config**: configuration management from environment variables
//! - **client**: HTTP clients for Google Drive, Google Sheets and OpenAI
//! - **repositories**: collaborator traits and their HTTP-backed implementations
//! - **services**: the sales assistant orchestrating the above
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod context;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod prompt;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::Config;
pub use context::{window, ContextWindow, ContextWindower, DEFAULT_CONTEXT_RADIUS};
pub use corpus::CorpusAggregator;
pub use error::{ConfigError, ExtractError, LlmError, StoreError};
pub use extract::{DocumentReader, DocxReader, PdfReader, PlainTextReader};
pub use matching::{MatchMode, MatchResult, RelevanceMatcher, StopwordFilter, TokenSet};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{CatalogRecord, CellValue, Corpus, EmptyReason, Outcome, RemoteFile};
pub use prompt::PromptComposer;
pub use server::SalesMcpServer;
pub use services::{AssistantReply, AssistantSettings, KnowledgeContext, SalesAssistant};
