//! Session store: one [`Session`] per user identifier, created lazily on
//! first contact. The store itself is plain single-threaded data — keying
//! is per user and sessions share nothing, so a front end that handles
//! users in parallel shards or locks the store however it likes.

use std::collections::HashMap;

use super::{Action, Event, Session};

/// Opaque per-user key, wide enough for the chat platforms' numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UserId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes one event through the user's session, creating a default
    /// session on first contact, and stores the successor state.
    pub fn handle(&mut self, user: UserId, event: &Event) -> Vec<Action> {
        let session = self.sessions.remove(&user).unwrap_or_default();
        let (next, actions) = session.apply(event);
        self.sessions.insert(user, next);
        actions
    }

    /// Read-only view of a user's session, if one exists yet.
    pub fn get(&self, user: UserId) -> Option<&Session> {
        self.sessions.get(&user)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
