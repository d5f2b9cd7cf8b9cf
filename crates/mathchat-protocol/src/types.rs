//! Core protocol types for mathchat's wire format.
//!
//! Everything the server writes to a client is one of the [`ServerLine`]
//! variants. Keeping them in one enum means the exact wire strings live in
//! exactly one `Display` impl.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque handle identifying one connected client.
///
/// Unique per connection for the lifetime of the process. Two clients may
/// pick the same nickname; they never share a `SessionId`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// The display name a client picked during the handshake.
///
/// Immutable once the session has joined. Construction does no
/// validation; the handshake policy (trimming, anonymous fallback) lives
/// in the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    /// Wraps a raw name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Placeholder for a client that entered an empty nickname.
    pub fn anonymous(id: SessionId) -> Self {
        Self(format!("anonymous-{}", id.0))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ServerLine: every line the server sends
// ---------------------------------------------------------------------------

/// A single outbound line.
///
/// | variant    | wire text                      |
/// |------------|--------------------------------|
/// | `Prompt`   | `Enter your nickname: `        |
/// | `Welcome`  | `You are <nickname>`           |
/// | `Arrived`  | `<nickname> has arrived`       |
/// | `Chat`     | `<nickname>:<text>`            |
/// | `Left`     | `<nickname> has left`          |
/// | `NewGame`  | `new game: <expression>=?`     |
/// | `Win`      | `<nickname> win!`              |
///
/// `Prompt` and `Welcome` go only to the session doing the handshake;
/// the rest are broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerLine {
    /// Asks a freshly connected client for a nickname.
    Prompt,
    /// Confirms the nickname the server assigned.
    Welcome { nickname: Nickname },
    /// Someone completed the handshake.
    Arrived { nickname: Nickname },
    /// A chat line (and possibly an answer to the current challenge).
    Chat { nickname: Nickname, text: String },
    /// Someone disconnected.
    Left { nickname: Nickname },
    /// A new arithmetic challenge, e.g. `42+7`.
    NewGame { expression: String },
    /// The first correct answer of a round.
    Win { nickname: Nickname },
}

impl ServerLine {
    /// Returns `true` for the lines every registered session receives.
    pub fn is_broadcast(&self) -> bool {
        !matches!(self, Self::Prompt | Self::Welcome { .. })
    }
}

impl fmt::Display for ServerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => write!(f, "Enter your nickname: "),
            Self::Welcome { nickname } => write!(f, "You are {nickname}"),
            Self::Arrived { nickname } => write!(f, "{nickname} has arrived"),
            Self::Chat { nickname, text } => write!(f, "{nickname}:{text}"),
            Self::Left { nickname } => write!(f, "{nickname} has left"),
            Self::NewGame { expression } => {
                write!(f, "new game: {expression}=?")
            }
            Self::Win { nickname } => write!(f, "{nickname} win!"),
        }
    }
}
