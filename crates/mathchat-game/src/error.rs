//! Error types for the game layer.

/// Errors from building a [`Challenge`](crate::Challenge) by hand.
///
/// Randomly generated challenges cannot fail; these only show up when
/// parsing or constructing one from outside input.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The text or operands do not describe a valid challenge.
    #[error("invalid challenge: {0}")]
    InvalidChallenge(String),
}
