//! Error types for the protocol layer.

/// Errors that can occur while decoding an inbound frame.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame is not valid UTF-8.
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The frame decoded but violates a protocol rule (e.g. too long).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
