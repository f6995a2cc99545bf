//! MCP tool handlers for the Contactos server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Every tool forwards to [`ContactService`] and renders the outcome as JSON text.

use crate::domain::ContactId;
use crate::error::ServiceError;
use crate::models::{ContactInput, ContactPatch};
use crate::services::ContactService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The Contactos MCP server that exposes the contact book as tools.
#[derive(Clone)]
pub struct ContactosMcpServer {
    contact_service: Arc<dyn ContactService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactosMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contactos-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Contact book - create, list, search, edit and delete contacts, and export a selection as CSV. Deleting requires a second call with confirm=true.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListContactsParams {
    /// Case-insensitive text to look for in names and emails
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContactIdParams {
    pub contact_id: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateContactParams {
    pub contact_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteContactParams {
    pub contact_id: u64,
    /// Must be true to actually delete; otherwise the contact is only shown for confirmation
    #[serde(default)]
    pub confirm: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExportContactsParams {
    /// Ids of the contacts to export, in the desired row order
    pub contact_ids: Vec<u64>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

/// Map a service failure onto the MCP surface.
///
/// Validation failures are ordinary tool results flagged as errors, carrying
/// the field messages and the submitted values. Missing contacts become
/// `RESOURCE_NOT_FOUND`; anything else is an internal error.
fn service_failure(err: ServiceError) -> Result<CallToolResult, McpError> {
    match err {
        ServiceError::Validation { errors, input } => {
            let body = serde_json::json!({
                "errors": errors,
                "input": input,
            });
            let text = serde_json::to_string_pretty(&body).map_err(to_mcp_error)?;
            Ok(CallToolResult::error(vec![Content::text(text)]))
        }
        ServiceError::NotFound(id) => Err(McpError {
            code: ErrorCode::RESOURCE_NOT_FOUND,
            message: Cow::from(format!("Contact {} not found", id)),
            data: Some(serde_json::json!({ "contact_id": id })),
        }),
        other => {
            tracing::error!("Contact operation failed: {}", other);
            Err(to_mcp_error(other))
        }
    }
}

// Tool router implementation
#[tool_router]
impl ContactosMcpServer {
    /// Create a new Contactos MCP server.
    pub fn new(contact_service: Arc<dyn ContactService>) -> Self {
        Self {
            contact_service,
            tool_router: Self::tool_router(),
        }
    }

    /// List all contacts, optionally filtered by a search query.
    #[tool(
        description = "List contacts. With a query, only contacts whose name or email contains it (case-insensitive) are returned."
    )]
    pub async fn list_contacts(
        &self,
        params: Parameters<ListContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: list_contacts called");

        let contacts = match self.contact_service.find(params.query.as_deref()).await {
            Ok(contacts) => contacts,
            Err(e) => return service_failure(e),
        };

        json_result(&serde_json::json!({
            "query": params.query,
            "result_count": contacts.len(),
            "contacts": contacts,
        }))
    }

    /// Retrieve a single contact by id.
    #[tool(description = "Retrieve a single contact by id")]
    pub async fn get_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: get_contact called");
        let id = ContactId::from(params.0.contact_id);

        match self.contact_service.get_one(id).await {
            Ok(contact) => json_result(&contact),
            Err(e) => service_failure(e),
        }
    }

    /// Create a new contact.
    #[tool(
        description = "Create a new contact. All fields are required; name is at most 100 characters, phone at most 11, and email at most 254 and must contain '@' and end in .com or .cl."
    )]
    pub async fn create_contact(
        &self,
        params: Parameters<ContactInput>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: create_contact called");

        match self.contact_service.create(params.0).await {
            Ok(contact) => json_result(&contact),
            Err(e) => service_failure(e),
        }
    }

    /// Edit an existing contact.
    #[tool(
        description = "Edit an existing contact. Omitted fields keep their current value; the result must satisfy the same rules as create_contact."
    )]
    pub async fn update_contact(
        &self,
        params: Parameters<UpdateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: update_contact called");
        tracing::debug!("Parameters: contact_id={}", params.contact_id);

        let patch = ContactPatch {
            name: params.name,
            phone: params.phone,
            email: params.email,
            address: params.address,
        };

        match self
            .contact_service
            .update(ContactId::from(params.contact_id), patch)
            .await
        {
            Ok(contact) => json_result(&contact),
            Err(e) => service_failure(e),
        }
    }

    /// Delete a contact in two steps.
    #[tool(
        description = "Delete a contact. Without confirm=true the contact is only looked up and returned for confirmation; call again with confirm=true to delete it."
    )]
    pub async fn delete_contact(
        &self,
        params: Parameters<DeleteContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: delete_contact called");
        let id = ContactId::from(params.contact_id);

        let pending = match self.contact_service.confirm_removal(id).await {
            Ok(pending) => pending,
            Err(e) => return service_failure(e),
        };

        if !params.confirm.unwrap_or(false) {
            return json_result(&serde_json::json!({
                "status": "pending_confirmation",
                "contact": pending.contact(),
                "message": format!(
                    "Call delete_contact again with confirm=true to delete \"{}\"",
                    pending.contact().label()
                ),
            }));
        }

        tracing::info!("MCP Handler: delete_contact confirmed for id={}", id);

        match self.contact_service.commit_removal(pending).await {
            Ok(contact) => json_result(&serde_json::json!({
                "status": "deleted",
                "contact_id": contact.id,
            })),
            Err(e) => service_failure(e),
        }
    }

    /// Export selected contacts as CSV.
    #[tool(
        description = "Export the selected contacts as CSV (columns Nombre, Teléfono, Correo, Dirección) in the given order. Returns the file name, media type and CSV content."
    )]
    pub async fn export_contacts_csv(
        &self,
        params: Parameters<ExportContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: export_contacts_csv called");
        let ids: Vec<ContactId> = params.0.contact_ids.into_iter().map(ContactId::from).collect();

        let export = match self.contact_service.export(&ids).await {
            Ok(export) => export,
            Err(e) => return service_failure(e),
        };

        json_result(&serde_json::json!({
            "filename": export.filename,
            "media_type": export.media_type,
            "record_count": export.record_count,
            "content": export.as_text(),
        }))
    }
}
