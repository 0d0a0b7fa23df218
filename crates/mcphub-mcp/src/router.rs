//! Tool router
//!
//! Resolves an identifier to its live session and forwards tool and resource
//! requests. The tool list is re-fetched from the server on every invocation
//! rather than cached, so a tool added or removed remotely is observed on
//! the next call. A transport failure does not evict the session from the
//! registry — deregistration is always an explicit disconnect.

use std::sync::Arc;

use rmcp::model::Tool;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use mcphub_core::{HubError, OutcomeStatus};

use crate::registry::SessionRegistry;
use crate::session::Session;

/// Successful invocation reply: `{status, tool, server, result}`.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeReply {
    pub status: OutcomeStatus,
    pub tool: String,
    pub server: String,
    pub result: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolListReply {
    pub status: OutcomeStatus,
    pub server: String,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceListReply {
    pub status: OutcomeStatus,
    pub server: String,
    pub resources: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceReadReply {
    pub status: OutcomeStatus,
    pub server: String,
    pub uri: String,
    pub contents: Vec<Value>,
}

pub struct ToolRouter {
    registry: Arc<SessionRegistry>,
}

impl ToolRouter {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    fn resolve(&self, identifier: &str) -> Result<Arc<Session>, HubError> {
        self.registry
            .lookup(identifier)
            .ok_or_else(|| HubError::ServerNotFound(identifier.to_string()))
    }

    /// Validate the tool against the server's live tool list, then forward
    /// the call.
    pub async fn invoke(
        &self,
        identifier: &str,
        tool_name: &str,
        arguments: Option<Value>,
    ) -> Result<InvokeReply, HubError> {
        let session = self.resolve(identifier)?;

        let tools = session.list_tools().await?;
        debug!(
            server_id = %identifier,
            tool_count = tools.len(),
            "Fetched live tool list"
        );

        if !tools.iter().any(|tool| tool.name == tool_name) {
            return Err(HubError::ToolNotFound {
                tool: tool_name.to_string(),
                server: identifier.to_string(),
                available: tools.iter().map(|tool| tool.name.to_string()).collect(),
            });
        }

        info!(server_id = %identifier, tool = %tool_name, "Calling tool");
        let result = session.call_tool(tool_name, arguments).await?;
        let result = serde_json::to_value(result)
            .map_err(|e| HubError::Internal(format!("unserializable tool result: {e}")))?;

        Ok(InvokeReply {
            status: OutcomeStatus::Success,
            tool: tool_name.to_string(),
            server: identifier.to_string(),
            result,
        })
    }

    pub async fn list_tools(&self, identifier: &str) -> Result<ToolListReply, HubError> {
        let session = self.resolve(identifier)?;
        let tools = session.list_tools().await?;
        Ok(ToolListReply {
            status: OutcomeStatus::Success,
            server: identifier.to_string(),
            tools,
        })
    }

    pub async fn list_resources(&self, identifier: &str) -> Result<ResourceListReply, HubError> {
        let session = self.resolve(identifier)?;
        let resources = session.list_resources().await?;
        Ok(ResourceListReply {
            status: OutcomeStatus::Success,
            server: identifier.to_string(),
            resources,
        })
    }

    pub async fn read_resource(
        &self,
        identifier: &str,
        uri: &str,
    ) -> Result<ResourceReadReply, HubError> {
        let session = self.resolve(identifier)?;
        let contents = session.read_resource(uri).await?;
        Ok(ResourceReadReply {
            status: OutcomeStatus::Success,
            server: identifier.to_string(),
            uri: uri.to_string(),
            contents,
        })
    }
}
