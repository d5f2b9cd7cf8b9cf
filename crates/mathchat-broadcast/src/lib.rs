//! The broadcaster: one control loop that owns the chat.
//!
//! The broadcaster runs as a single Tokio task (actor model). It is the
//! only owner of the client [`Registry`](mathchat_session::Registry) and
//! the [`Game`](mathchat_game::Game); everything else talks to it through
//! a [`BroadcasterHandle`]. Because one loop processes every join, leave
//! and message in the order they arrive, every client sees broadcast
//! lines in the same relative order, and the game has exactly one writer.
//!
//! # Key types
//!
//! - [`spawn`] / [`spawn_with_rng`]: start a control loop
//! - [`BroadcasterHandle`]: send events to a running loop
//! - [`BroadcasterInfo`]: snapshot of membership and game status
//! - [`BroadcasterConfig`]: channel sizing and game settings

mod broadcaster;
mod config;
mod error;

pub use broadcaster::{BroadcasterHandle, BroadcasterInfo, spawn, spawn_with_rng};
pub use config::BroadcasterConfig;
pub use error::BroadcastError;
