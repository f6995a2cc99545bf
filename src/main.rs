//! Contactos MCP Server - Main entry point
//!
//! This is the main executable for the Contactos MCP Server, which provides a
//! Model Context Protocol (MCP) interface to a small contact book.

use anyhow::Result;
use contactos_mcp_server::repositories::{
    ContactRepository, InMemoryContactRepository, JsonFileContactRepository,
};
use contactos_mcp_server::services::{ContactService, ContactServiceImpl};
use contactos_mcp_server::{Config, ContactosMcpServer, Metrics, StorageBackend};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration first, so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let fallback_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize the contact store
    let contact_repo: Arc<dyn ContactRepository> = match config.storage {
        StorageBackend::File => {
            info!("Using contact data file: {}", config.data_file.display());
            Arc::new(JsonFileContactRepository::open(&config.data_file).await?)
        }
        StorageBackend::Memory => {
            info!("Using in-memory contact store");
            Arc::new(InMemoryContactRepository::new())
        }
    };

    let metrics = Metrics::new();
    let contact_service = Arc::new(ContactServiceImpl::new(contact_repo, metrics.clone()))
        as Arc<dyn ContactService>;

    let server = ContactosMcpServer::new(contact_service);
    info!("Contactos MCP Server initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    contactos_mcp_server::server::run_server(server).await?;

    info!("Contactos MCP Server shutdown complete ({})", metrics.summary());
    Ok(())
}
