//! # McpHub MCP Library
//!
//! Session management for multiple child-process-backed MCP servers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SessionManager                         │
//! │                                                             │
//! │  ConnectionSupervisor ──▶ SessionRegistry ◀── ToolRouter    │
//! │        │                  identifier →        │             │
//! │        │                  Session             │             │
//! │        ▼                                      ▼             │
//! │  TransportFactory ──────▶ Session ──▶ TransportHandle       │
//! │  (stdio child process)    (sole owner)   (rmcp client)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A session is published to the registry only after a successful handshake;
//! while the spawn and handshake are in flight the identifier is held by a
//! `Connecting` reservation, so two concurrent registrations of the same
//! identifier resolve to exactly one success and one `AlreadyRegistered`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mcphub_core::ServerDescriptor;
//! use mcphub_mcp::SessionManager;
//!
//! let manager = SessionManager::new();
//!
//! let descriptor = ServerDescriptor::command(
//!     "github",
//!     "npx",
//!     vec!["-y".to_string(), "@modelcontextprotocol/server-github".to_string()],
//! );
//! manager.register_server(&descriptor).await?;
//!
//! let reply = manager
//!     .invoke_tool("github", "search_code", Some(serde_json::json!({"q": "foo"})))
//!     .await?;
//! ```

pub mod launch;
pub mod lifecycle;
pub mod manager;
pub mod registry;
pub mod router;
pub mod session;
pub mod supervisor;
pub mod transport;

pub use launch::LaunchPlan;
pub use lifecycle::LifecycleCoordinator;
pub use manager::SessionManager;
pub use registry::{Reservation, SessionRegistry};
pub use router::{InvokeReply, ResourceListReply, ResourceReadReply, ToolListReply, ToolRouter};
pub use session::Session;
pub use supervisor::ConnectionSupervisor;
pub use transport::{
    HubClientHandler, McpClient, StdioTransportFactory, TransportFactory, TransportHandle,
};
