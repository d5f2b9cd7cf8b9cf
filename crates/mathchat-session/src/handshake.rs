//! Nickname handshake policy.

use mathchat_protocol::{Nickname, SessionId};

use crate::SessionConfig;

/// Turns the raw line a client typed at the nickname prompt into the
/// nickname it will carry for the rest of the session.
///
/// - surrounding whitespace is stripped
/// - an empty result becomes `anonymous-<session number>`
/// - anything longer than `config.max_nickname_len` characters is cut
pub fn resolve_nickname(raw: &str, id: SessionId, config: &SessionConfig) -> Nickname {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Nickname::anonymous(id);
    }
    let name: String = trimmed.chars().take(config.max_nickname_len).collect();
    // Truncation can expose trailing whitespace from the middle of the input.
    Nickname::new(name.trim_end())
}
