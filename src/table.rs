//! Connection-keyed session registry owned by a server process.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DhError, Result};
use crate::params::DomainParameters;
use crate::session::{KeyAgreementSession, Role};

/// Identifier of one transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

/// Sessions of the currently open connections.
///
/// A session lives from [`SessionTable::open`] to [`SessionTable::close`]; closing the
/// connection drops the session and its secret exponent.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<ConnectionId, KeyAgreementSession>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for a newly opened connection.
    pub fn open(
        &mut self,
        id: ConnectionId,
        role: Role,
        params: DomainParameters,
    ) -> Result<&mut KeyAgreementSession> {
        if let Some(existing) = self.sessions.get(&id) {
            return Err(DhError::InvalidSessionState {
                expected: "no session for connection",
                actual: existing.state().name(),
            });
        }

        debug!(connection = id.0, ?role, "session opened");
        Ok(self
            .sessions
            .entry(id)
            .or_insert_with(|| KeyAgreementSession::new(role, params)))
    }

    pub fn get(&self, id: ConnectionId) -> Option<&KeyAgreementSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut KeyAgreementSession> {
        self.sessions.get_mut(&id)
    }

    /// Remove the session of a closed connection.
    pub fn close(&mut self, id: ConnectionId) -> Option<KeyAgreementSession> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            debug!(connection = id.0, "session closed");
        }
        removed
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
