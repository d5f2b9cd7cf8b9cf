//! Round state machine.
//!
//! ```text
//!            try_start_round(n ≥ min)          try_accept(correct)
//!   Idle ─────────────────────────→ InProgress ───────────────────→ Over
//!                                       ↑                            │
//!                                       └──── try_start_round ───────┘
//! ```
//!
//! Each state carries only the data that is meaningful in it: there is no
//! "current answer" outside `InProgress`, so it cannot be checked by
//! mistake.

use std::fmt;

use mathchat_protocol::Nickname;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{Challenge, GameConfig};

/// The tag of the current round state, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No round has been played yet.
    Idle,
    /// A challenge is out and unanswered.
    InProgress,
    /// The last challenge was answered; waiting to re-arm.
    Over,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Over => write!(f, "Over"),
        }
    }
}

#[derive(Debug, Clone)]
enum Round {
    Idle,
    InProgress { challenge: Challenge },
    Over { challenge: Challenge, winner: Nickname },
}

/// The shared arithmetic game.
///
/// Generic over the random source so tests can seed it.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    config: GameConfig,
    round: Round,
    rng: R,
    rounds_played: u64,
}

impl Game<StdRng> {
    /// Creates an idle game seeded from the operating system.
    pub fn from_os_rng(config: GameConfig) -> Self {
        Self::new(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Creates an idle game drawing challenges from `rng`.
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            round: Round::Idle,
            rng,
            rounds_played: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.round {
            Round::Idle => GameStatus::Idle,
            Round::InProgress { .. } => GameStatus::InProgress,
            Round::Over { .. } => GameStatus::Over,
        }
    }

    /// The open challenge, only while a round is in progress.
    pub fn current_challenge(&self) -> Option<&Challenge> {
        match &self.round {
            Round::InProgress { challenge } => Some(challenge),
            _ => None,
        }
    }

    /// Winner of the most recent round, while the game is `Over`.
    pub fn last_winner(&self) -> Option<&Nickname> {
        match &self.round {
            Round::Over { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// The challenge that was just won, while the game is `Over`.
    pub fn last_challenge(&self) -> Option<&Challenge> {
        match &self.round {
            Round::Over { challenge, .. } => Some(challenge),
            _ => None,
        }
    }

    /// Number of rounds that ended with a correct answer.
    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Draws a fresh challenge without touching the round state.
    pub fn generate_challenge(&mut self) -> Challenge {
        Challenge::random(&mut self.rng)
    }

    /// Starts a round if enough people are present and none is running.
    ///
    /// Returns the new challenge, which the caller must broadcast. Calling
    /// it again while a round is in progress is a no-op.
    pub fn try_start_round(&mut self, participants: usize) -> Option<Challenge> {
        if participants < self.config.min_participants {
            return None;
        }
        if matches!(self.round, Round::InProgress { .. }) {
            return None;
        }

        let challenge = self.generate_challenge();
        tracing::info!(
            expression = %challenge,
            participants,
            "round started"
        );
        self.round = Round::InProgress {
            challenge: challenge.clone(),
        };
        Some(challenge)
    }

    /// Checks a chat line against the open challenge.
    ///
    /// Returns `true` for the first correct answer of a round and moves
    /// the game to `Over`. Anything else (no round, non-integer text, wrong
    /// number) returns `false` and changes nothing.
    pub fn try_accept(&mut self, nickname: &Nickname, answer: &str) -> bool {
        let Round::InProgress { challenge } = &self.round else {
            return false;
        };
        let Ok(value) = answer.trim().parse::<i64>() else {
            return false;
        };
        if value != challenge.result() {
            return false;
        }

        tracing::info!(%nickname, expression = %challenge, "round won");
        let challenge = challenge.clone();
        self.round = Round::Over {
            challenge,
            winner: nickname.clone(),
        };
        self.rounds_played += 1;
        true
    }
}
