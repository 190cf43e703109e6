//! MCP server for the portfolio contact form.
//!
//! Exposes form validation and submission to MCP clients so a front end or
//! assistant can drive the contact flow without touching the DOM.

pub mod handlers;

pub use handlers::ContactFormServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the contact form server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: ContactFormServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
