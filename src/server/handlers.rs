//! MCP tool handlers for the sales assistant.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! The service is synchronous, so each tool runs it on the blocking thread pool.

use crate::models::Outcome;
use crate::services::{AssistantReply, SalesAssistant};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing the sales assistant as tools.
#[derive(Clone)]
pub struct SalesMcpServer {
    assistant: Arc<SalesAssistant>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for SalesMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "tour-sales-assistant".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Tour sales assistant - suggests catalog tours for customer messages and answers questions grounded in company documents (itineraries, visa notes, tour sheet).".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MessageParams {
    /// Customer message, in Vietnamese or any language used by the catalog
    message: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct QuestionParams {
    question: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CompareToursParams {
    first_tour: String,
    second_tour: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckVisaParams {
    nationality: String,
    destination: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

fn reply_result(reply: &AssistantReply) -> Result<CallToolResult, McpError> {
    json_result(&serde_json::to_value(reply).map_err(to_mcp_error)?)
}

impl SalesMcpServer {
    /// Run a synchronous assistant call off the async runtime.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, McpError>
    where
        F: FnOnce(&SalesAssistant) -> T + Send + 'static,
        T: Send + 'static,
    {
        let assistant = self.assistant.clone();
        tokio::task::spawn_blocking(move || f(&assistant))
            .await
            .map_err(to_mcp_error)
    }
}

#[tool_router]
impl SalesMcpServer {
    /// Create a new server around a configured assistant.
    pub fn new(assistant: Arc<SalesAssistant>) -> Self {
        Self {
            assistant,
            tool_router: Self::tool_router(),
        }
    }

    /// Suggest catalog tours for a customer message.
    #[tool(
        description = "Suggest tours from the catalog for a customer message using keyword overlap (no AI). Returns tours ranked by the number of matched keywords."
    )]
    async fn suggest_tours(
        &self,
        params: Parameters<MessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let message = params.0.message;
        tracing::info!("MCP Handler: suggest_tours called");

        let query = message.clone();
        let outcome = self
            .run_blocking(move |assistant| assistant.suggest_tours(&query))
            .await?;
        let status = outcome.status();

        let results = match outcome {
            Outcome::Found(results) => results,
            Outcome::Empty(_) => Vec::new(),
            Outcome::SourceUnavailable(e) => {
                tracing::error!("Tour catalog unavailable: {:?}", e);
                return Err(to_mcp_error(e));
            }
        };

        json_result(&serde_json::json!({
            "message": message,
            "status": status,
            "result_count": results.len(),
            "results": results.iter().map(|r| {
                serde_json::json!({
                    "score": r.score,
                    "tour": r.record,
                })
            }).collect::<Vec<_>>(),
        }))
    }

    /// Answer a question from company documents and the tour catalog.
    #[tool(
        description = "Answer a question using internal company data: documents in the knowledge folder plus the tour catalog. The answer is written by the language model and grounded in the most relevant excerpt."
    )]
    async fn ask_company(
        &self,
        params: Parameters<QuestionParams>,
    ) -> Result<CallToolResult, McpError> {
        let question = params.0.question;
        tracing::info!("MCP Handler: ask_company called");

        let reply = self
            .run_blocking(move |assistant| assistant.ask_company(&question))
            .await?;
        reply_result(&reply)
    }

    /// Return the grounding excerpt for a question without calling the model.
    #[tool(
        description = "Return the excerpt of company documents and tour catalog that would ground an answer to the question, without calling the language model."
    )]
    async fn get_company_context(
        &self,
        params: Parameters<QuestionParams>,
    ) -> Result<CallToolResult, McpError> {
        let question = params.0.question;
        tracing::info!("MCP Handler: get_company_context called");

        let outcome = self
            .run_blocking(move |assistant| assistant.knowledge_context(&question))
            .await?;
        let status = outcome.status();

        match outcome {
            Outcome::SourceUnavailable(e) => {
                tracing::error!("Company data unavailable: {:?}", e);
                Err(to_mcp_error(e))
            }
            other => json_result(&serde_json::json!({
                "status": status,
                "context": other.into_found(),
            })),
        }
    }

    /// Suggest ways to handle a customer objection.
    #[tool(description = "Suggest three professional ways to respond to a customer objection (for example \"the price is too high\").")]
    async fn handle_objection(
        &self,
        params: Parameters<MessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let message = params.0.message;
        tracing::info!("MCP Handler: handle_objection called");

        let reply = self
            .run_blocking(move |assistant| assistant.handle_objection(&message))
            .await?;
        reply_result(&reply)
    }

    /// Compare two tours using company data.
    #[tool(description = "Compare two tours (itinerary, price, duration, highlights) using internal company data.")]
    async fn compare_tours(
        &self,
        params: Parameters<CompareToursParams>,
    ) -> Result<CallToolResult, McpError> {
        let CompareToursParams {
            first_tour,
            second_tour,
        } = params.0;
        tracing::info!("MCP Handler: compare_tours called");
        tracing::debug!("Parameters: first_tour={}, second_tour={}", first_tour, second_tour);

        let reply = self
            .run_blocking(move |assistant| assistant.compare_tours(&first_tour, &second_tour))
            .await?;
        reply_result(&reply)
    }

    /// Visa requirements for a nationality and destination.
    #[tool(description = "Check visa requirements for a traveller's nationality and destination using internal company visa notes.")]
    async fn check_visa(
        &self,
        params: Parameters<CheckVisaParams>,
    ) -> Result<CallToolResult, McpError> {
        let CheckVisaParams {
            nationality,
            destination,
        } = params.0;
        tracing::info!("MCP Handler: check_visa called");
        tracing::debug!("Parameters: nationality={}, destination={}", nationality, destination);

        let reply = self
            .run_blocking(move |assistant| assistant.visa_requirements(&nationality, &destination))
            .await?;
        reply_result(&reply)
    }
}
