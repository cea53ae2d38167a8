//! Game configuration

use serde::{Deserialize, Serialize};

use crate::ai::HeuristicOpponent;
use crate::game::{Game, GameMode};

/// Settings for starting a game against (or between) heuristic opponents
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Fixed seed for reproducible opponent choices; random when absent
    pub opponent_seed: Option<u64>,
}

impl GameConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            opponent_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.opponent_seed = Some(seed);
        self
    }

    /// Start a fresh game in the configured mode
    pub fn new_game(&self) -> Game {
        Game::start(self.mode)
    }

    /// Opponent seeded as configured
    pub fn opponent(&self) -> HeuristicOpponent {
        match self.opponent_seed {
            Some(seed) => HeuristicOpponent::with_seed(seed),
            None => HeuristicOpponent::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Side;

    #[test]
    fn test_default_is_single_player_against_black() {
        let config = GameConfig::default();
        assert_eq!(config.mode, GameMode::SinglePlayer { automated: Side::Black });
        assert_eq!(config.opponent_seed, None);
    }

    #[test]
    fn test_seeded_opponents_agree() {
        let config = GameConfig::new(GameMode::SelfPlay).with_seed(9);
        let game = config.new_game();
        let a = config.opponent().choose_move(&game).unwrap();
        let b = config.opponent().choose_move(&game).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_json() {
        let config = GameConfig::new(GameMode::TwoPlayer).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
