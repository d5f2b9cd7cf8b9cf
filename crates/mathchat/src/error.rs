//! Unified error type for mathchat.

use mathchat_broadcast::BroadcastError;
use mathchat_game::GameError;
use mathchat_protocol::ProtocolError;
use mathchat_session::SessionError;
use mathchat_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum MathchatError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (bad UTF-8, oversized line).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The nickname handshake did not complete.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An invalid challenge was built or parsed.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The broadcaster control loop is gone.
    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let mathchat_err: MathchatError = err.into();
        assert!(matches!(mathchat_err, MathchatError::Transport(_)));
        assert!(mathchat_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("too long".into());
        let mathchat_err: MathchatError = err.into();
        assert!(matches!(mathchat_err, MathchatError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let mathchat_err: MathchatError = SessionError::HandshakeTimedOut.into();
        assert!(matches!(mathchat_err, MathchatError::Session(_)));
        assert_eq!(mathchat_err.to_string(), "handshake timed out");
    }

    #[test]
    fn test_from_game_error() {
        let err = "1/0".parse::<mathchat_game::Challenge>().unwrap_err();
        let mathchat_err: MathchatError = err.into();
        assert!(matches!(mathchat_err, MathchatError::Game(_)));
    }

    #[test]
    fn test_from_broadcast_error() {
        let mathchat_err: MathchatError = BroadcastError::Unavailable.into();
        assert!(matches!(mathchat_err, MathchatError::Broadcast(_)));
    }
}
