//! MCP server implementation for the contact book.
//!
//! This module provides the MCP protocol server that exposes contact
//! management to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::ContactosMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Contactos MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
///
/// # Arguments
/// * `server` - The configured ContactosMcpServer instance
///
/// # Returns
/// An error if the server fails to start or encounters a fatal error
pub async fn run_server(server: ContactosMcpServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
