//! The client registry: every session that has joined the chat.
//!
//! # Concurrency note
//!
//! `Registry` is NOT thread-safe by itself, it is a plain `BTreeMap`. The
//! broadcaster's control loop owns it and is its only mutator, so no lock
//! is ever needed.
//!
//! # Invariant
//!
//! A session is in the registry iff its mailbox is open. Removing a
//! session drops its mailbox sender (closing it); a fan-out that finds a
//! mailbox whose writer already hung up prunes that session on the spot.

use std::collections::BTreeMap;

use mathchat_protocol::{ServerLine, SessionId};

use crate::Session;

/// Set of joined sessions, keyed by handle.
///
/// Ordered by `SessionId` so fan-out visits members in join order, which
/// keeps logs and tests readable. Ordering *across* sessions does not
/// matter for correctness; ordering *per* session is the mailbox's FIFO.
#[derive(Debug, Default)]
pub struct Registry {
    members: BTreeMap<SessionId, Session>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session.
    ///
    /// Returns the session previously registered under the same handle, if
    /// any. The caller decides what to do with it; dropping it closes its
    /// mailbox.
    pub fn insert(&mut self, session: Session) -> Option<Session> {
        self.members.insert(session.id(), session)
    }

    /// Removes a session. Dropping the returned value closes its mailbox.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        self.members.remove(&id)
    }

    /// Returns `true` if the handle is registered.
    pub fn contains(&self, id: SessionId) -> bool {
        self.members.contains_key(&id)
    }

    /// Number of joined sessions.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nobody is joined.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Delivers `line` to every registered session.
    ///
    /// Never waits: mailboxes are unbounded. Sessions whose writer task
    /// has already gone away are removed and their handles returned.
    pub fn fan_out(&mut self, line: &ServerLine) -> Vec<SessionId> {
        let mut dead = Vec::new();
        for (id, session) in &self.members {
            if !session.deliver(line.clone()) {
                dead.push(*id);
            }
        }
        for id in &dead {
            self.members.remove(id);
            tracing::debug!(session_id = %id, "pruned session with closed mailbox");
        }
        dead
    }

    /// Removes every session, closing all mailboxes.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}
