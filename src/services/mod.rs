//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between the
//! collaborators in `repositories` and the core. They provide a clean boundary
//! between the MCP handlers and the data access layer.

mod sales_assistant;

pub use sales_assistant::{AssistantReply, AssistantSettings, KnowledgeContext, SalesAssistant};
