//! Session manager facade
//!
//! Composes the registry, supervisor, router, and lifecycle coordinator into
//! the surface the front-end wraps. One manager owns one registry;
//! independent managers can coexist in a process.

use std::sync::Arc;

use serde_json::Value;

use mcphub_core::{HubError, OperationOutcome, ServerDescriptor, StatusReport};

use crate::lifecycle::LifecycleCoordinator;
use crate::registry::SessionRegistry;
use crate::router::{InvokeReply, ResourceListReply, ResourceReadReply, ToolListReply, ToolRouter};
use crate::supervisor::ConnectionSupervisor;
use crate::transport::{StdioTransportFactory, TransportFactory};

pub struct SessionManager {
    registry: Arc<SessionRegistry>,
    supervisor: Arc<ConnectionSupervisor>,
    router: ToolRouter,
    lifecycle: LifecycleCoordinator,
}

impl SessionManager {
    /// Manager backed by the stdio child-process transport.
    pub fn new() -> Self {
        Self::with_factory(Arc::new(StdioTransportFactory::new()))
    }

    /// Manager with an injected transport factory (tests plug mocks in here).
    pub fn with_factory(factory: Arc<dyn TransportFactory>) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let supervisor = Arc::new(ConnectionSupervisor::new(Arc::clone(&registry), factory));
        let router = ToolRouter::new(Arc::clone(&registry));
        let lifecycle = LifecycleCoordinator::new(Arc::clone(&registry), Arc::clone(&supervisor));
        Self {
            registry,
            supervisor,
            router,
            lifecycle,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Point-in-time connection status of every registered server.
    pub fn status(&self) -> StatusReport {
        StatusReport::from_entries(self.registry.enumerate())
    }

    pub async fn register_server(
        &self,
        descriptor: &ServerDescriptor,
    ) -> Result<OperationOutcome, HubError> {
        self.supervisor.connect(descriptor).await?;
        Ok(OperationOutcome::success(format!(
            "Successfully connected to server: {}",
            descriptor.identifier
        ))
        .with_server(descriptor.identifier.clone()))
    }

    /// Remove the session and close its handle. The entry is out of the
    /// registry before the close result is known, so a second disconnect
    /// reports `ServerNotFound` instead of touching the handle again.
    pub async fn disconnect_server(
        &self,
        identifier: &str,
    ) -> Result<OperationOutcome, HubError> {
        let session = self
            .registry
            .remove(identifier)
            .ok_or_else(|| HubError::ServerNotFound(identifier.to_string()))?;
        session.close().await?;
        Ok(
            OperationOutcome::success(format!("Successfully disconnected server: {identifier}"))
                .with_server(identifier),
        )
    }

    pub async fn invoke_tool(
        &self,
        identifier: &str,
        tool_name: &str,
        arguments: Option<Value>,
    ) -> Result<InvokeReply, HubError> {
        self.router.invoke(identifier, tool_name, arguments).await
    }

    pub async fn list_tools(&self, identifier: &str) -> Result<ToolListReply, HubError> {
        self.router.list_tools(identifier).await
    }

    pub async fn list_resources(&self, identifier: &str) -> Result<ResourceListReply, HubError> {
        self.router.list_resources(identifier).await
    }

    pub async fn read_resource(
        &self,
        identifier: &str,
        uri: &str,
    ) -> Result<ResourceReadReply, HubError> {
        self.router.read_resource(identifier, uri).await
    }

    pub async fn register_all(&self, descriptors: &[ServerDescriptor]) -> Vec<OperationOutcome> {
        self.lifecycle.register_all(descriptors).await
    }

    pub async fn shutdown_all(&self) -> Vec<OperationOutcome> {
        self.lifecycle.shutdown_all().await
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
