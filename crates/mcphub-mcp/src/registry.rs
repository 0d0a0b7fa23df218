//! Session registry
//!
//! The single shared mutable structure: identifier → session. Keys are
//! unique. An identifier is held either by a live session or by a
//! `Connecting` placeholder reserved synchronously before any suspending
//! work begins, so there is no window between the existence check and the
//! visible insert for a second registration to slip through.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use mcphub_core::{HubError, SessionStatus};

use crate::session::Session;

enum SessionSlot {
    /// Held by an in-flight reservation; invisible to `lookup`.
    Connecting,
    Ready(Arc<Session>),
}

#[derive(Default)]
pub struct SessionRegistry {
    slots: DashMap<String, SessionSlot>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim an identifier ahead of a connection attempt.
    ///
    /// Dropping the returned guard unfulfilled removes the placeholder, so
    /// every failure path out of a connect attempt releases the identifier.
    pub fn reserve(&self, identifier: &str) -> Result<Reservation<'_>, HubError> {
        match self.slots.entry(identifier.to_string()) {
            Entry::Occupied(_) => Err(HubError::AlreadyRegistered(identifier.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(SessionSlot::Connecting);
                Ok(Reservation {
                    registry: self,
                    identifier: identifier.to_string(),
                    fulfilled: false,
                })
            }
        }
    }

    /// Atomic check-and-insert of a connected session.
    pub fn insert(&self, session: Arc<Session>) -> Result<(), HubError> {
        let identifier = session.identifier().to_string();
        match self.slots.entry(identifier) {
            Entry::Occupied(entry) => Err(HubError::AlreadyRegistered(entry.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(SessionSlot::Ready(session));
                Ok(())
            }
        }
    }

    /// The live session for an identifier, if any. Placeholders for
    /// in-flight connects are not visible here.
    pub fn lookup(&self, identifier: &str) -> Option<Arc<Session>> {
        match self.slots.get(identifier)?.value() {
            SessionSlot::Ready(session) => Some(Arc::clone(session)),
            SessionSlot::Connecting => None,
        }
    }

    /// Remove a live session, returning ownership so the caller can close
    /// its handle. Absent identifiers are a no-op, and a `Connecting`
    /// placeholder is left alone — it belongs to its reservation.
    pub fn remove(&self, identifier: &str) -> Option<Arc<Session>> {
        let removed = self
            .slots
            .remove_if(identifier, |_, slot| matches!(slot, SessionSlot::Ready(_)));
        match removed {
            Some((_, SessionSlot::Ready(session))) => Some(session),
            _ => None,
        }
    }

    /// Snapshot of (identifier, status) pairs, sorted for stable reporting.
    pub fn enumerate(&self) -> Vec<(String, SessionStatus)> {
        let mut entries: Vec<(String, SessionStatus)> = self
            .slots
            .iter()
            .map(|entry| {
                let status = match entry.value() {
                    SessionSlot::Connecting => SessionStatus::Connecting,
                    SessionSlot::Ready(session) => session.status(),
                };
                (entry.key().clone(), status)
            })
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// RAII claim on an identifier while a connection attempt is in flight.
pub struct Reservation<'a> {
    registry: &'a SessionRegistry,
    identifier: String,
    fulfilled: bool,
}

impl Reservation<'_> {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Publish the connected session, replacing the placeholder.
    pub fn fulfill(mut self, session: Arc<Session>) {
        self.registry
            .slots
            .insert(self.identifier.clone(), SessionSlot::Ready(session));
        self.fulfilled = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.fulfilled {
            self.registry
                .slots
                .remove_if(&self.identifier, |_, slot| {
                    matches!(slot, SessionSlot::Connecting)
                });
            debug!(server_id = %self.identifier, "Released connection reservation");
        }
    }
}
