//! Error taxonomy for McpHub operations
//!
//! One shared enum covers registration, invocation, and teardown. Variants
//! that cross the transport boundary carry the underlying cause; message
//! texts are part of the HTTP contract and are asserted in tests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// Registration of an identifier that already holds a live (or in-flight)
    /// session. Rejected without spawning anything.
    #[error("Server {0} is already registered")]
    AlreadyRegistered(String),

    /// A script path whose extension maps to no known interpreter.
    #[error("Server script must be a .py or .js file: {path}")]
    UnsupportedScriptType { path: String },

    /// The launch command does not resolve to an executable.
    #[error("Command not found: {command}. Ensure it's installed and in PATH")]
    ScriptNotFound { command: String },

    /// Spawn or handshake failure, including handshake timeout.
    #[error("Failed to connect to server {identifier}: {cause}")]
    ConnectionFailed {
        identifier: String,
        cause: anyhow::Error,
    },

    /// Lookup of an identifier with no live session.
    #[error("Server {0} not found. Please register the server first")]
    ServerNotFound(String),

    /// The requested tool is absent from the server's live tool list.
    /// Carries the available names so callers can correct themselves.
    #[error("Tool {tool} not found in server {server}. Available tools: {}", .available.join(", "))]
    ToolNotFound {
        tool: String,
        server: String,
        available: Vec<String>,
    },

    /// RPC-level failure on an established session: the remote process died,
    /// an I/O error, or a malformed response.
    #[error("Transport error on server {server}: {cause}")]
    Transport {
        server: String,
        cause: anyhow::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// True for errors the caller can fix by changing the request.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            HubError::AlreadyRegistered(_)
                | HubError::UnsupportedScriptType { .. }
                | HubError::ScriptNotFound { .. }
                | HubError::ServerNotFound(_)
                | HubError::ToolNotFound { .. }
        )
    }
}
