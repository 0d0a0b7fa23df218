//! A live session for one managed server

use std::sync::Arc;

use parking_lot::RwLock;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

use mcphub_core::{HubError, SessionStatus};

use crate::transport::TransportHandle;

/// Live, connected state for one server.
///
/// Sole owner of its transport handle; no other component issues requests on
/// the underlying channel. Created by the supervisor after a successful
/// handshake (the test harness constructs sessions over mock handles).
pub struct Session {
    identifier: String,
    status: RwLock<SessionStatus>,
    handle: Arc<dyn TransportHandle>,
}

impl Session {
    pub fn connected(identifier: String, handle: Arc<dyn TransportHandle>) -> Self {
        Self {
            identifier,
            status: RwLock::new(SessionStatus::Connected),
            handle,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.read()
    }

    pub fn is_connected(&self) -> bool {
        self.status().is_connected()
    }

    fn transport_err(&self, cause: anyhow::Error) -> HubError {
        HubError::Transport {
            server: self.identifier.clone(),
            cause,
        }
    }

    pub async fn list_tools(&self) -> Result<Vec<Tool>, HubError> {
        self.handle
            .list_tools()
            .await
            .map_err(|e| self.transport_err(e))
    }

    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<CallToolResult, HubError> {
        self.handle
            .call_tool(name, arguments)
            .await
            .map_err(|e| self.transport_err(e))
    }

    pub async fn list_resources(&self) -> Result<Vec<Value>, HubError> {
        self.handle
            .list_resources()
            .await
            .map_err(|e| self.transport_err(e))
    }

    pub async fn read_resource(&self, uri: &str) -> Result<Vec<Value>, HubError> {
        self.handle
            .read_resource(uri)
            .await
            .map_err(|e| self.transport_err(e))
    }

    /// Close the owned transport handle. Safe to call on an already-dead
    /// session; the handle ignores a second close.
    pub async fn close(&self) -> Result<(), HubError> {
        match self.handle.close().await {
            Ok(()) => {
                *self.status.write() = SessionStatus::Disconnected;
                Ok(())
            }
            Err(cause) => {
                *self.status.write() = SessionStatus::Failed;
                Err(self.transport_err(cause))
            }
        }
    }
}
