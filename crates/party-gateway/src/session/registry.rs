//! Session registry
//!
//! Thread-safe map of session id to live session.

use super::Session;
use crate::connection::ConnectionHandle;
use parking_lot::Mutex;
use party_core::SessionId;
use std::collections::HashMap;
use std::sync::Arc;

/// Live sessions by id
pub(crate) type SessionMap = Mutex<HashMap<SessionId, Arc<Session>>>;

/// Remove `session` from the map if it is still the entry for its id
///
/// Called by a session that just lost its last member, with the session's
/// membership lock held.
pub(crate) fn remove_if_current(sessions: &SessionMap, session: &Session) {
    let mut sessions = sessions.lock();

    let is_current = sessions
        .get(session.id())
        .is_some_and(|current| std::ptr::eq(Arc::as_ptr(current), session));

    if is_current {
        sessions.remove(session.id());
        tracing::debug!(session_id = %session.id(), "Session removed from registry");
    }
}

/// Registry of all live sessions
pub struct SessionRegistry {
    sessions: Arc<SessionMap>,
}

impl SessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create an empty registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Get the session for `id`, creating an empty one if none exists
    ///
    /// Concurrent callers with the same id always receive the same session.
    pub fn get_or_create(&self, id: &SessionId) -> Arc<Session> {
        let mut sessions = self.sessions.lock();

        if let Some(session) = sessions.get(id) {
            return Arc::clone(session);
        }

        let session = Arc::new(Session::new(id.clone(), Arc::downgrade(&self.sessions)));
        sessions.insert(id.clone(), Arc::clone(&session));

        tracing::debug!(session_id = %id, "Session created");

        session
    }

    /// Register `handle` with the session for `id`
    ///
    /// If the session found was torn down between lookup and insert, a fresh
    /// one is looked up and the join retried.
    pub fn join(&self, id: &SessionId, handle: ConnectionHandle) -> Arc<Session> {
        loop {
            let session = self.get_or_create(id);

            if session.add(handle.clone()).is_ok() {
                return session;
            }

            tracing::trace!(session_id = %id, "Joined a closing session, retrying");
        }
    }

    /// Get an existing session
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.lock().get(id).cloned()
    }

    /// Check if a session exists
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.lock().contains_key(id)
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.session_count())
            .finish()
    }
}
