//! Error types for the session layer.

/// Errors that end a session before it ever joins the chat.
///
/// Once a session has joined, transport failures are not errors from the
/// chat's point of view: they simply turn into a leave.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The client hung up before sending a nickname.
    #[error("connection closed before handshake")]
    ClosedBeforeHandshake,

    /// The client did not send a nickname within the configured timeout.
    #[error("handshake timed out")]
    HandshakeTimedOut,
}
