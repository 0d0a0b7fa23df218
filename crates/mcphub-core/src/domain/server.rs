//! Server identity and session state

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Launch specification for one managed server, keyed by `identifier`.
///
/// The identifier is chosen by the caller: either a logical name paired with
/// an explicit `command`, or a script path from which the interpreter is
/// inferred. Immutable once a connection attempt begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub identifier: String,
    /// Executable or interpreter. When absent the identifier is treated as a
    /// script path.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    /// Merged over the ambient process environment; override wins.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl ServerDescriptor {
    /// Descriptor with an explicit launch command.
    pub fn command(
        identifier: impl Into<String>,
        command: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            command: Some(command.into()),
            args,
            env: HashMap::new(),
        }
    }

    /// Descriptor for a script path; the interpreter is derived from the
    /// file extension at connect time.
    pub fn script(path: impl Into<String>) -> Self {
        Self {
            identifier: path.into(),
            command: None,
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

/// Connection state for a session. Runtime state, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Reservation placeholder while spawn and handshake are in flight
    Connecting,
    /// Handshake complete, session live
    Connected,
    /// Teardown hit an error; the handle may be half-closed
    Failed,
    /// Closed by explicit disconnect or shutdown
    Disconnected,
}

impl SessionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionStatus::Connected)
    }
}
