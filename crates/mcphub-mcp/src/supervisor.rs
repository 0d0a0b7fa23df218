//! Connection supervisor
//!
//! Establishes sessions: derives the launch plan, claims the identifier in
//! the registry, spawns and handshakes through the transport factory, and
//! publishes the connected session. Of two concurrent connects for the same
//! identifier exactly one wins the reservation; the other observes
//! `AlreadyRegistered` and spawns nothing.

use std::sync::Arc;

use tracing::{info, warn};

use mcphub_core::{HubError, ServerDescriptor};

use crate::launch::LaunchPlan;
use crate::registry::SessionRegistry;
use crate::session::Session;
use crate::transport::TransportFactory;

pub struct ConnectionSupervisor {
    registry: Arc<SessionRegistry>,
    factory: Arc<dyn TransportFactory>,
}

impl ConnectionSupervisor {
    pub fn new(registry: Arc<SessionRegistry>, factory: Arc<dyn TransportFactory>) -> Self {
        Self { registry, factory }
    }

    /// Connect one server and register the session. No automatic retries;
    /// retry policy belongs to the caller.
    pub async fn connect(&self, descriptor: &ServerDescriptor) -> Result<Arc<Session>, HubError> {
        // Rejecting a bad descriptor and claiming the identifier both happen
        // before any process is spawned.
        let launch = LaunchPlan::derive(descriptor)?;
        let reservation = self.registry.reserve(&descriptor.identifier)?;

        info!(
            server_id = %descriptor.identifier,
            command = %launch.command,
            "Registering server"
        );

        // From here every error path drops the reservation, which clears the
        // placeholder; the factory closes its half-open transport before
        // returning an error.
        let handle = match self.factory.open(descriptor, &launch).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(
                    server_id = %descriptor.identifier,
                    error = %e,
                    "Connection attempt failed"
                );
                return Err(e);
            }
        };

        let session = Arc::new(Session::connected(descriptor.identifier.clone(), handle));
        reservation.fulfill(Arc::clone(&session));

        info!(server_id = %descriptor.identifier, "Server connected");
        Ok(session)
    }
}
