//! Shared handler state

use std::sync::Arc;

use mcphub_core::HubConfig;
use mcphub_mcp::SessionManager;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
    pub config: Arc<HubConfig>,
}

impl AppState {
    pub fn new(manager: Arc<SessionManager>, config: Arc<HubConfig>) -> Self {
        Self { manager, config }
    }
}
