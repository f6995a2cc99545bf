//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! the contact store, validation and export. They provide a clean boundary
//! between the MCP handlers and the data access layer.

mod contact_service;

pub use contact_service::{ContactService, ContactServiceImpl, PendingDeletion};
