//! Lifecycle coordinator
//!
//! Bulk registration at startup and bulk graceful shutdown on termination.
//! Both aggregate per-item outcomes; one server's failure never aborts the
//! batch.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use mcphub_core::{OperationOutcome, ServerDescriptor};

use crate::registry::SessionRegistry;
use crate::supervisor::ConnectionSupervisor;

pub struct LifecycleCoordinator {
    registry: Arc<SessionRegistry>,
    supervisor: Arc<ConnectionSupervisor>,
}

impl LifecycleCoordinator {
    pub fn new(registry: Arc<SessionRegistry>, supervisor: Arc<ConnectionSupervisor>) -> Self {
        Self {
            registry,
            supervisor,
        }
    }

    /// Attempt to connect every descriptor, one outcome per descriptor in
    /// input order.
    pub async fn register_all(&self, descriptors: &[ServerDescriptor]) -> Vec<OperationOutcome> {
        let mut outcomes = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let outcome = match self.supervisor.connect(descriptor).await {
                Ok(_) => OperationOutcome::success(format!(
                    "Successfully connected to server: {}",
                    descriptor.identifier
                ))
                .with_server(descriptor.identifier.clone()),
                Err(e) => {
                    warn!(
                        server_id = %descriptor.identifier,
                        error = %e,
                        "Registration failed"
                    );
                    OperationOutcome::error(format!(
                        "Failed to register {}: {}",
                        descriptor.identifier, e
                    ))
                    .with_server(descriptor.identifier.clone())
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Close every registered session's handle and clear the registry. Each
    /// close is attempted independently; a failing handle does not stop the
    /// rest. Safe to invoke again after completion (yields no outcomes) and
    /// safe against sessions that are already dead.
    pub async fn shutdown_all(&self) -> Vec<OperationOutcome> {
        let snapshot = self.registry.enumerate();
        info!(count = snapshot.len(), "Shutting down all sessions");

        let closes = snapshot.into_iter().map(|(identifier, _)| {
            let registry = Arc::clone(&self.registry);
            async move {
                let Some(session) = registry.remove(&identifier) else {
                    // Raced with an explicit disconnect between snapshot and
                    // removal; nothing left to close.
                    return OperationOutcome::success(format!(
                        "Server {identifier} already disconnected"
                    ))
                    .with_server(identifier);
                };
                match session.close().await {
                    Ok(()) => OperationOutcome::success(format!(
                        "Successfully disconnected server: {identifier}"
                    ))
                    .with_server(identifier),
                    Err(e) => {
                        warn!(server_id = %identifier, error = %e, "Failed to close session");
                        OperationOutcome::error(format!("Failed to disconnect {identifier}: {e}"))
                            .with_server(identifier)
                    }
                }
            }
        });

        join_all(closes).await
    }
}
