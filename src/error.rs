use thiserror::Error;

use crate::types::Coord;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("coordinates ({x},{y}) are outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("cell ({x},{y}) is already occupied")]
    CellOccupied { x: usize, y: usize },
    #[error("player {player} has no card at hand index {card_index}")]
    CardNotInHand { player: usize, card_index: usize },
    #[error("no player with index {0}")]
    UnknownPlayer(usize),
    #[error("player {player} has no legal action")]
    NoLegalAction { player: usize },
    #[error("card catalog error: {0}")]
    Catalog(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    pub(crate) fn out_of_bounds(at: Coord) -> Self {
        GameError::OutOfBounds { x: at.x, y: at.y }
    }

    pub(crate) fn occupied(at: Coord) -> Self {
        GameError::CellOccupied { x: at.x, y: at.y }
    }

    /// Illegal moves are recoverable: the caller may pick another action.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::OutOfBounds { .. } | GameError::CellOccupied { .. } | GameError::CardNotInHand { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
