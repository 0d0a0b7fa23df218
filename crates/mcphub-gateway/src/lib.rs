//! # McpHub Gateway
//!
//! Thin HTTP front-end over the session manager: every route resolves to one
//! manager operation, and every error maps to the structured
//! `{status, message}` envelope. No routing-level state beyond the shared
//! manager and the loaded configuration.

pub mod handlers;
pub mod server;
pub mod state;

pub use server::{router, serve};
pub use state::AppState;
