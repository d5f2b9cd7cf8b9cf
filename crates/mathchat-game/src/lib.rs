//! The arithmetic mini-game played in the chat.
//!
//! Pure logic, no I/O and no locking: a [`Game`] is owned by exactly one
//! task (the broadcaster's control loop) and mutated only there.
//!
//! # Key types
//!
//! - [`Challenge`]: one `a <op> b` problem and its answer
//! - [`Operator`]: `+`, `-`, `*`, `/` (truncating)
//! - [`Game`]: round state machine: Idle → InProgress → Over → InProgress
//! - [`GameStatus`]: the state's tag, for reporting
//! - [`GameConfig`]: how many participants a round needs

mod challenge;
mod config;
mod error;
mod game;

pub use challenge::{Challenge, LHS_RANGE, Operator, RHS_RANGE};
pub use config::GameConfig;
pub use error::GameError;
pub use game::{Game, GameStatus};
