//! Game configuration.

use serde::{Deserialize, Serialize};

/// Settings for the round state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Participants needed before a round starts.
    ///
    /// Default: 2. A challenge is never issued to a lone client.
    pub min_participants: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { min_participants: 2 }
    }
}
