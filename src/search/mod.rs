use tracing::debug;

use crate::agent::Agent;
use crate::error::{GameError, Result};
use crate::state::{Action, GameState};

pub mod maximax;

pub use maximax::{choose_action, search_depth, value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Depth numerator: the search looks `max_depth % free_spaces` plies past the root move.
    pub max_depth: usize,
    /// Optional wall-clock budget; the best action found so far is returned when it runs out.
    pub time_ms: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: 9,
            time_ms: None,
        }
    }
}

/// Result of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub action: Action,
    pub value: i64,
    pub depth: usize,
    pub nodes: u64,
}

/// Depth-limited lookahead player bound to one seat.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    index: usize,
    limits: SearchLimits,
    last: Option<SearchOutcome>,
}

impl SearchAgent {
    pub fn new(index: usize) -> Self {
        Self::with_limits(index, SearchLimits::default())
    }

    pub fn with_limits(index: usize, limits: SearchLimits) -> Self {
        Self {
            index,
            limits,
            last: None,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Outcome of the most recent decision.
    #[inline]
    pub fn last_outcome(&self) -> Option<SearchOutcome> {
        self.last
    }
}

impl Agent for SearchAgent {
    fn name(&self) -> &str {
        "search"
    }

    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        if state.current_index() != self.index {
            return Err(GameError::NoLegalAction { player: self.index });
        }
        let outcome = choose_action(state, self.index, self.limits)?;
        debug!(
            player = self.index,
            card_index = outcome.action.card_index,
            at = %outcome.action.at,
            value = outcome.value,
            depth = outcome.depth,
            nodes = outcome.nodes,
            "search decision"
        );
        self.last = Some(outcome);
        Ok(outcome.action)
    }
}
