//! Error types for the broadcaster layer.

/// Errors returned by [`BroadcasterHandle`](crate::BroadcasterHandle).
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// The control loop has stopped (shut down or panicked).
    #[error("broadcaster is unavailable")]
    Unavailable,
}
