//! Structured operation results
//!
//! Every externally exposed operation reports through these shapes; bulk
//! operations aggregate one entry per item instead of failing fast.

use std::collections::BTreeMap;

use serde::Serialize;

use super::SessionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Result of one register/disconnect/close attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
}

impl OperationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
            server_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            message: message.into(),
            server_id: None,
        }
    }

    pub fn with_server(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = Some(server_id.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Point-in-time view of the registry for status reporting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub total_servers: usize,
    pub servers: BTreeMap<String, ServerStatusEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusEntry {
    pub is_connected: bool,
    pub identifier: String,
}

impl StatusReport {
    pub fn from_entries(entries: Vec<(String, SessionStatus)>) -> Self {
        let servers: BTreeMap<String, ServerStatusEntry> = entries
            .into_iter()
            .map(|(identifier, status)| {
                (
                    identifier.clone(),
                    ServerStatusEntry {
                        is_connected: status.is_connected(),
                        identifier,
                    },
                )
            })
            .collect();
        Self {
            total_servers: servers.len(),
            servers,
        }
    }
}
