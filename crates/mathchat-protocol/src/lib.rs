//! Wire protocol for mathchat.
//!
//! This crate defines the "language" the chat server speaks:
//!
//! - **Types** ([`ServerLine`], [`Nickname`], [`SessionId`]): every line
//!   the server ever writes, plus the identities that appear in them.
//! - **Codec** ([`Codec`] trait, [`LineCodec`]): how lines are turned
//!   into transport frames and back.
//! - **Errors** ([`ProtocolError`]): what can go wrong while decoding.
//!
//! # Architecture
//!
//! ```text
//! Transport (frames) → Protocol (text lines) → Session / Broadcaster
//! ```
//!
//! Clients send plain text. There is no separate command channel: an
//! answer to the arithmetic game is just a chat line whose text is an
//! integer.

mod codec;
mod error;
mod types;

pub use codec::{Codec, LineCodec, MAX_LINE_LEN};
pub use error::ProtocolError;
pub use types::{Nickname, ServerLine, SessionId};
