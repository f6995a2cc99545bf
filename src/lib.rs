//! Contactos MCP Server - a small contact book exposed over the Model Context Protocol.
//!
//! The library covers the whole contact lifecycle: create, list with substring
//! search, view, edit, two-step delete, and CSV export of a selection.
//!
//! # Architecture
//!
//! - **models**: The contact record and its input shapes
//! - **domain**: Contact ids, the email rule and the ordered field validators
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Contact store trait with in-memory and JSON-file backends
//! - **services**: Business logic that validates and orchestrates store calls
//! - **export**: CSV rendering of contact selections
//! - **metrics**: Operation counters
//! - **server**: MCP protocol server

pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::{Config, StorageBackend};
pub use domain::{ContactField, ContactId, ValidationErrors};
pub use error::{ConfigError, ExportError, ServiceError, StoreError};
pub use export::{export_contacts_csv, CsvExport};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Contact, ContactInput, ContactPatch};
pub use repositories::{ContactRepository, InMemoryContactRepository, JsonFileContactRepository};
pub use server::ContactosMcpServer;
pub use services::{ContactService, ContactServiceImpl, PendingDeletion};
