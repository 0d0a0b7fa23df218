//! # McpHub Core Library
//!
//! Domain types and business rules shared across McpHub:
//!
//! - `domain` - Core entities (ServerDescriptor, SessionStatus, outcomes)
//! - `config` - `mcp_config.json` parsing
//! - `error` - The error taxonomy every operation reports through

pub mod config;
pub mod domain;
pub mod error;

// Re-export commonly used types
pub use config::{HubConfig, ServerEntry};
pub use domain::*;
pub use error::HubError;
