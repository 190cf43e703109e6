//! MCP tool handlers for the contact form server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::models::MessageKind;
use crate::pipeline::ContactFormService;
use crate::validation::FormValues;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the portfolio contact form.
#[derive(Clone)]
pub struct ContactFormServer {
    service: Arc<dyn ContactFormService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactFormServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "portfolio-contact".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Portfolio contact form - validates contact and conversational form input and delivers it to the site owner's inbox, one submission at a time.".into()),
        }
    }
}

/// Which form the fields belong to.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum FormKindParam {
    Contact,
    Conversational,
}

impl From<FormKindParam> for MessageKind {
    fn from(kind: FormKindParam) -> Self {
        match kind {
            FormKindParam::Contact => MessageKind::Contact,
            FormKindParam::Conversational => MessageKind::Conversational,
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ValidateFormParams {
    /// Form to validate against (default: contact)
    #[serde(default)]
    form: Option<FormKindParam>,
    /// Field values keyed by field name
    fields: FormValues,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SubmitFormParams {
    /// Field values keyed by field name
    fields: FormValues,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

// Tool router implementation
#[tool_router]
impl ContactFormServer {
    /// Create a new contact form server.
    pub fn new(service: Arc<dyn ContactFormService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Validate form input and report every field error.
    #[tool(
        description = "Validate contact or conversational form input without sending it. Returns per-field validity and messages plus an allValid flag."
    )]
    async fn validate_contact_form(
        &self,
        params: Parameters<ValidateFormParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let kind: MessageKind = params.form.unwrap_or(FormKindParam::Contact).into();

        let result = self.service.validate(kind, &params.fields);

        let json_response = serde_json::to_string_pretty(&result).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Submit the direct contact form.
    #[tool(
        description = "Submit the portfolio contact form. Fields: firstName, lastName, email, company (optional), subject, message, privacy (\"on\" to consent). Returns status sent, not_sent (busy or delivery failed) or invalid with field errors."
    )]
    async fn submit_contact_form(
        &self,
        params: Parameters<SubmitFormParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: submit_contact_form called");
        tracing::debug!("Parameters: fields={:?}", params.fields.keys());

        let outcome = self
            .service
            .submit_form(MessageKind::Contact, &params.fields)
            .await;

        let json_response = serde_json::to_string_pretty(&outcome).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Submit a conversational contact message.
    #[tool(
        description = "Submit a conversational contact message. Fields: name, email, company (optional), subject, specifics, message. Returns status sent, not_sent (busy or delivery failed) or invalid with field errors."
    )]
    async fn submit_conversational_message(
        &self,
        params: Parameters<SubmitFormParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: submit_conversational_message called");
        tracing::debug!("Parameters: fields={:?}", params.fields.keys());

        let outcome = self
            .service
            .submit_form(MessageKind::Conversational, &params.fields)
            .await;

        let json_response = serde_json::to_string_pretty(&outcome).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// List messages delivered since the server started.
    #[tool(description = "List every message delivered since the server started, oldest first")]
    async fn get_sent_messages(&self) -> Result<CallToolResult, McpError> {
        let sent = self.service.sent_messages();
        let json_response = serde_json::to_string_pretty(&sent).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Report submission counters.
    #[tool(
        description = "Report submission metrics: accepted, rejected while busy, sent, failed and average send time"
    )]
    async fn get_submission_metrics(&self) -> Result<CallToolResult, McpError> {
        let summary = self.service.metrics();
        let json_response = serde_json::to_string_pretty(&summary).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }
}
