use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::rules::Rules;

/// Setup for one run. Loadable from JSON; absent fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub hand_size: usize,
    pub players: usize,
    pub rules: Rules,
    /// Fixed seed for dealing, elements and turn order; random when absent.
    pub seed: Option<u64>,
    /// Cap on sudden-death rounds; a tie after the last one is a draw.
    pub max_rounds: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 3,
            height: 3,
            hand_size: 5,
            players: 2,
            rules: Rules::default(),
            seed: None,
            max_rounds: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let mut cfg: GameConfig = serde_json::from_str(data)?;
        cfg.rules = cfg.rules.normalized();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every player can keep playing until the grid is full.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::Config("board must have at least one cell".to_string()));
        }
        if self.players < 2 {
            return Err(GameError::Config("at least two players are required".to_string()));
        }
        let cells = self.width * self.height;
        let needed = cells.div_ceil(self.players);
        if self.hand_size < needed {
            return Err(GameError::Config(format!(
                "hand size {} is too small for {cells} cells and {} players (need {needed})",
                self.hand_size, self.players
            )));
        }
        Ok(())
    }
}
