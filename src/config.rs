use std::time::Duration;

use serde::Deserialize;

use crate::board::validate_size;
use crate::error::EngineError;
use crate::types::Side;

pub const DEFAULT_BOARD_SIZE: u8 = 6;
pub const DEFAULT_OPPONENT_DELAY_MS: u32 = 500;

/// Settings for one game, as passed in by the UI. Missing fields fall back
/// to the defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: u8,
    pub human_side: Side,
    pub first_to_move: Side,
    /// Delay between a human move and the computer's reply.
    pub opponent_delay_ms: u32,
    /// Seed for the random opponent; clock-seeded when absent.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_size(self.board_size)
    }

    pub fn computer_side(&self) -> Side {
        self.human_side.opponent()
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.opponent_delay_ms))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            human_side: Side::Dark,
            first_to_move: Side::Dark,
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY_MS,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.computer_side(), Side::Light);
        assert_eq!(config.opponent_delay(), Duration::from_millis(500));
    }

    #[test]
    fn partial_object_overrides_named_fields() {
        let config: GameConfig =
            serde_json::from_str(r#"{"board_size": 8, "human_side": "light", "seed": 7}"#).unwrap();

        assert_eq!(config.board_size, 8);
        assert_eq!(config.human_side, Side::Light);
        assert_eq!(config.first_to_move, Side::Dark);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unsupported_sizes() {
        let config = GameConfig {
            board_size: 7,
            ..GameConfig::default()
        };

        assert_eq!(config.validate(), Err(EngineError::InvalidBoardSize(7)));
    }
}
