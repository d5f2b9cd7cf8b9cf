//! Client session management for mathchat.
//!
//! This crate holds everything that describes *one connected client* and
//! the set of them:
//!
//! 1. **Session**: identity, nickname and outbound [`Mailbox`]
//! 2. **Handshake policy**: how raw nickname input becomes a [`Nickname`]
//!    ([`resolve_nickname`])
//! 3. **Registry**: the joined sessions, with fan-out ([`Registry`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Broadcaster (above)  ← sole owner and mutator of the Registry
//!     ↕
//! Session Layer (this crate)  ← sessions, mailboxes, nickname policy
//!     ↕
//! Protocol Layer (below)  ← SessionId, Nickname, ServerLine
//! ```
//!
//! [`Nickname`]: mathchat_protocol::Nickname

mod error;
mod handshake;
mod registry;
mod session;

pub use error::SessionError;
pub use handshake::resolve_nickname;
pub use registry::Registry;
pub use session::{Mailbox, MailboxReceiver, Session, SessionConfig, mailbox};
