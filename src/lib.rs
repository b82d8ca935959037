#![forbid(unsafe_code)]
#![deny(clippy::all)]

pub mod types;
pub mod rules;
pub mod cards;
pub mod location;
pub mod board;
pub mod player;
pub mod state;
pub mod rng;
pub mod error;
pub mod config;
pub mod agent;
pub mod display;
pub mod game;

pub mod engine {
    pub mod apply;
    pub mod score;
}

pub mod search;

// Re-exports: stable minimal API surface for external callers
pub use crate::agent::{Agent, FirstAvailableAgent, HumanAgent, RandomAgent, ScriptedAgent};
pub use crate::board::Board;
pub use crate::cards::{load_cards_from_json, Card, CardsDb};
pub use crate::config::GameConfig;
pub use crate::display::{Display, GameOutcome, GameView, LogDisplay, NullDisplay, TextDisplay};
pub use crate::engine::apply::{handle_card_placement, Flip, FlipCause, PlacementReport};
pub use crate::engine::score::{owned_cells, score_margin, total_score};
pub use crate::error::{GameError, Result};
pub use crate::game::Game;
pub use crate::location::{Location, Neighbor};
pub use crate::player::{compare_scores, Player};
pub use crate::rng::rng_for_game;
pub use crate::rules::Rules;
pub use crate::search::{SearchAgent, SearchLimits, SearchOutcome};
pub use crate::state::{Action, GameState};
pub use crate::types::{Coord, Dir, Element};
