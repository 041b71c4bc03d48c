//! Session
//!
//! A named group of active connections. Membership is guarded by the
//! session's own lock; the lock is never held while sending.
//!
//! Lock order: a session's membership lock is always taken before the
//! registry lock, never the reverse.

use super::registry::{self, SessionMap};
use crate::connection::{ConnectionHandle, ConnectionId};
use crate::error::SessionClosed;
use parking_lot::RwLock;
use party_core::SessionId;
use std::sync::Weak;

/// Membership of a session
#[derive(Debug, Default)]
struct Members {
    /// Handles in join order
    handles: Vec<ConnectionHandle>,
    /// Bumped on every add and remove
    version: u64,
    /// Set once membership drops to zero; a closed session never reopens
    closed: bool,
}

/// Point-in-time copy of a session's membership
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub members: Vec<ConnectionHandle>,
    pub version: u64,
}

impl Snapshot {
    /// Number of members at the time of the snapshot
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A listening session
pub struct Session {
    id: SessionId,
    members: RwLock<Members>,
    /// Registry that owns this session, used to remove it once empty
    registry: Weak<SessionMap>,
}

impl Session {
    pub(crate) fn new(id: SessionId, registry: Weak<SessionMap>) -> Self {
        Self {
            id,
            members: RwLock::new(Members::default()),
            registry,
        }
    }

    /// Get the session ID
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Register a connection
    ///
    /// Returns `Ok(false)` if the handle was already a member. Fails if the
    /// session has already emptied out and been removed from its registry.
    pub fn add(&self, handle: ConnectionHandle) -> Result<bool, SessionClosed> {
        let mut members = self.members.write();

        if members.closed {
            return Err(SessionClosed(self.id.clone()));
        }

        if members.handles.contains(&handle) {
            return Ok(false);
        }

        members.handles.push(handle);
        members.version += 1;

        tracing::trace!(
            session_id = %self.id,
            members = members.handles.len(),
            "Connection added to session"
        );

        Ok(true)
    }

    /// Deregister a connection
    ///
    /// Removing an absent handle is a no-op returning `false`. When the last
    /// member leaves, the session closes and removes itself from the
    /// registry while still holding its membership lock.
    pub fn remove(&self, connection_id: ConnectionId) -> bool {
        let mut members = self.members.write();

        let Some(index) = members
            .handles
            .iter()
            .position(|h| h.id() == connection_id)
        else {
            return false;
        };

        members.handles.remove(index);
        members.version += 1;

        if members.handles.is_empty() {
            members.closed = true;

            if let Some(sessions) = self.registry.upgrade() {
                registry::remove_if_current(&sessions, self);
            }

            tracing::debug!(session_id = %self.id, "Last member left, session closed");
        }

        true
    }

    /// Copy the current membership
    pub fn snapshot(&self) -> Snapshot {
        let members = self.members.read();
        Snapshot {
            members: members.handles.clone(),
            version: members.version,
        }
    }

    /// Number of current members
    pub fn member_count(&self) -> usize {
        self.members.read().handles.len()
    }

    /// Check if a connection is a member
    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.members
            .read()
            .handles
            .iter()
            .any(|h| h.id() == connection_id)
    }

    /// Check if the session has been emptied and torn down
    pub fn is_closed(&self) -> bool {
        self.members.read().closed
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members = self.members.read();
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("members", &members.handles.len())
            .field("version", &members.version)
            .field("closed", &members.closed)
            .finish()
    }
}
