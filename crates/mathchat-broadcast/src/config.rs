//! Broadcaster configuration.

use mathchat_game::GameConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a broadcaster instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcasterConfig {
    /// Capacity of the event channel feeding the control loop.
    ///
    /// When full, session reader tasks wait before publishing more; the
    /// loop itself never waits on a recipient, so it keeps draining.
    pub event_buffer: usize,

    /// Settings for the shared game.
    pub game: GameConfig,
}

impl Default for BroadcasterConfig {
    fn default() -> Self {
        Self {
            event_buffer: 64,
            game: GameConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcaster_config_default() {
        let config = BroadcasterConfig::default();
        assert_eq!(config.event_buffer, 64);
        assert_eq!(config.game.min_participants, 2);
    }
}
