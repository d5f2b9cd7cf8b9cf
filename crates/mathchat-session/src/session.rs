//! Session types: what the server knows about one connected client.
//!
//! A session is:
//! - WHO the client is (`SessionId`, `Nickname`)
//! - WHERE its outbound lines go (the [`Mailbox`])
//!
//! The mailbox is an unbounded `mpsc` channel. The sending half travels
//! with the `Session` into the registry; the receiving half belongs to the
//! connection's writer task. Because the registry ends up holding the
//! *only* sender, removing the session from the registry is what closes
//! the mailbox, and it can only happen once.

use std::time::Duration;

use mathchat_protocol::{Nickname, ServerLine, SessionId};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for the per-connection handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long a fresh connection may take to send its nickname.
    ///
    /// Default: 60 seconds.
    pub handshake_timeout: Duration,

    /// Nicknames longer than this (in characters) are truncated.
    ///
    /// Default: 32.
    pub max_nickname_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: Duration::from_secs(60),
            max_nickname_len: 32,
        }
    }
}

// ---------------------------------------------------------------------------
// Mailbox
// ---------------------------------------------------------------------------

/// Sending half of a session's outbound queue.
pub type Mailbox = mpsc::UnboundedSender<ServerLine>;

/// Receiving half, drained by the session's writer task.
pub type MailboxReceiver = mpsc::UnboundedReceiver<ServerLine>;

/// Creates a new, empty mailbox.
///
/// Unbounded on purpose: the broadcaster must never wait on a slow
/// reader, so back-pressure stops at the writer task.
pub fn mailbox() -> (Mailbox, MailboxReceiver) {
    mpsc::unbounded_channel()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A client that has completed the nickname handshake.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    nickname: Nickname,
    mailbox: Mailbox,
}

impl Session {
    /// Creates a session. Takes ownership of the mailbox sender.
    pub fn new(id: SessionId, nickname: Nickname, mailbox: Mailbox) -> Self {
        Self {
            id,
            nickname,
            mailbox,
        }
    }

    /// The connection-unique handle.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The nickname chosen at handshake.
    pub fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    /// Queues a line for this session's writer task.
    ///
    /// Returns `false` if the writer task is gone (its receiver dropped).
    pub fn deliver(&self, line: ServerLine) -> bool {
        self.mailbox.send(line).is_ok()
    }

    /// Returns `true` once the writer side has hung up.
    pub fn is_closed(&self) -> bool {
        self.mailbox.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.handshake_timeout, Duration::from_secs(60));
        assert_eq!(config.max_nickname_len, 32);
    }

    #[test]
    fn test_deliver_queues_in_order() {
        let (tx, mut rx) = mailbox();
        let session = Session::new(SessionId(1), Nickname::new("ann"), tx);

        assert!(session.deliver(ServerLine::Prompt));
        assert!(session.deliver(ServerLine::Win {
            nickname: Nickname::new("ann")
        }));

        assert_eq!(rx.try_recv().unwrap(), ServerLine::Prompt);
        assert!(matches!(rx.try_recv().unwrap(), ServerLine::Win { .. }));
    }

    #[test]
    fn test_deliver_fails_after_receiver_dropped() {
        let (tx, rx) = mailbox();
        let session = Session::new(SessionId(1), Nickname::new("ann"), tx);
        drop(rx);

        assert!(session.is_closed());
        assert!(!session.deliver(ServerLine::Prompt));
    }

    #[test]
    fn test_dropping_session_closes_mailbox() {
        let (tx, mut rx) = mailbox();
        let session = Session::new(SessionId(1), Nickname::new("ann"), tx);
        session.deliver(ServerLine::Prompt);
        drop(session);

        // In-flight mail is still readable, then the channel reports closed.
        assert_eq!(rx.try_recv().unwrap(), ServerLine::Prompt);
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
