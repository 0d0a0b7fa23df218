//! Shared test utilities and fixtures for McpHub integration tests.

use std::sync::Arc;

use mcphub_core::ServerDescriptor;
use mcphub_mcp::SessionManager;

pub use mocks::{tool, MockBehavior, MockHandle, MockTransportFactory};

/// A session manager wired to a mock transport factory.
pub struct ManagerTestHarness {
    pub manager: Arc<SessionManager>,
    pub factory: Arc<MockTransportFactory>,
}

impl ManagerTestHarness {
    pub fn new() -> Self {
        let factory = Arc::new(MockTransportFactory::new());
        let transport: Arc<dyn mcphub_mcp::TransportFactory> = factory.clone();
        let manager = Arc::new(SessionManager::with_factory(transport));
        Self { manager, factory }
    }

    /// Harness with one scripted server ready to connect.
    pub fn with_server(identifier: &str, tools: &[&str]) -> Self {
        let harness = Self::new();
        harness.factory.serve_tools(identifier, tools);
        harness
    }

    /// The mock handle backing a connected server.
    pub fn handle(&self, identifier: &str) -> Arc<MockHandle> {
        self.factory
            .handle(identifier)
            .expect("server was never connected")
    }
}

impl Default for ManagerTestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A descriptor with an explicit launch command; the mock factory never
/// spawns it.
pub fn descriptor(identifier: &str) -> ServerDescriptor {
    ServerDescriptor::command(identifier, "mock-server", Vec::new())
}
