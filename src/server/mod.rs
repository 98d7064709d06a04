//! MCP server implementation for the tour sales assistant.
//!
//! This module provides the MCP protocol server that exposes the sales
//! assistant to AI clients through the Model Context Protocol.

pub mod handlers;

pub use handlers::SalesMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the MCP server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns when the
/// client disconnects.
pub async fn run_server(server: SalesMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
