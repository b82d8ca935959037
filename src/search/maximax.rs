use std::time::{Duration, Instant};

use tracing::trace;

use crate::engine::score::score_margin;
use crate::error::{GameError, Result};
use crate::state::GameState;

use super::{SearchLimits, SearchOutcome};

/// Weight of one point of score margin.
const MARGIN_SCALE: i64 = 100;

/// Plies searched below each root move: `max_depth % free_spaces`.
///
/// The depth deliberately shrinks and wraps as the board fills
/// (9 free cells gives 0, 5 gives 4, 2 gives 1).
#[inline]
pub fn search_depth(max_depth: usize, free_spaces: usize) -> usize {
    if free_spaces == 0 {
        0
    } else {
        max_depth % free_spaces
    }
}

struct Budget {
    deadline: Option<Instant>,
    nodes: u64,
}

impl Budget {
    #[inline]
    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Value of a successor for `me`: pass the turn, score the margin, and if
/// depth remains add the best continuation over every action of the new mover.
///
/// Every ply maximises, including the opponent's. Terminal positions (no
/// legal action) are leaves.
pub fn value(state: GameState, me: usize, depth: usize) -> i64 {
    let mut budget = Budget {
        deadline: None,
        nodes: 0,
    };
    value_inner(state, me, depth, &mut budget)
}

fn value_inner(mut state: GameState, me: usize, depth: usize, budget: &mut Budget) -> i64 {
    budget.nodes += 1;
    state.advance_turn();
    let margin = MARGIN_SCALE * i64::from(score_margin(&state, me));
    if depth == 0 || budget.expired() {
        return margin;
    }

    let mover = state.current_index();
    let mut best: Option<i64> = None;
    for action in state.legal_actions() {
        let Ok(child) = state.generate_successor(mover, action) else {
            continue;
        };
        let v = value_inner(child, me, depth - 1, budget) + margin;
        best = Some(best.map_or(v, |b| b.max(v)));
    }
    trace!(depth, mover, ?best, margin, "expanded node");
    best.unwrap_or(margin)
}

/// Pick the action for `me` with the highest value. Ties keep the first action
/// in legal-action order (cards, then cells).
pub fn choose_action(state: &GameState, me: usize, limits: SearchLimits) -> Result<SearchOutcome> {
    if state.current_index() != me {
        return Err(GameError::NoLegalAction { player: me });
    }
    let actions = state.legal_actions();
    if actions.is_empty() {
        return Err(GameError::NoLegalAction { player: me });
    }

    let depth = search_depth(limits.max_depth, state.board.free_space_count());
    let mut budget = Budget {
        deadline: limits
            .time_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms)),
        nodes: 0,
    };

    let mut best: Option<(i64, usize)> = None;
    for (i, &action) in actions.iter().enumerate() {
        let child = state.generate_successor(me, action)?;
        let v = value_inner(child, me, depth, &mut budget);
        if !best.is_some_and(|(b, _)| v <= b) {
            best = Some((v, i));
        }
        if budget.expired() {
            break;
        }
    }

    let (value, i) = best.ok_or(GameError::NoLegalAction { player: me })?;
    Ok(SearchOutcome {
        action: actions[i],
        value,
        depth,
        nodes: budget.nodes,
    })
}
