use std::collections::BTreeMap;

use tracing::debug;

use crate::board::Board;
use crate::player::Player;
use crate::types::Coord;

/// Which rule caused a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipCause {
    Same,
    Plus,
    Combo,
    Basic,
}

/// One ownership change: exactly one location and exactly one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub at: Coord,
    pub from: usize,
    pub to: usize,
    pub cause: FlipCause,
}

/// Everything one placement did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    pub at: Coord,
    pub player: usize,
    pub flips: Vec<Flip>,
}

impl PlacementReport {
    #[inline]
    pub fn flipped(&self, cause: FlipCause) -> impl Iterator<Item = &Flip> + '_ {
        self.flips.iter().filter(move |f| f.cause == cause)
    }
}

/// Move ownership of the card at `at` to `to`, one point from the old owner to
/// the new. Owner and scores change together or not at all. Walls, empty
/// cells and cards already owned by `to` are left alone.
fn flip(
    board: &mut Board,
    players: &mut [Player],
    at: Coord,
    to: usize,
    cause: FlipCause,
    flips: &mut Vec<Flip>,
) {
    let Some(loc) = board.location_mut(at) else {
        return;
    };
    let Some(from) = loc.owner() else {
        return;
    };
    if from == to || from >= players.len() || to >= players.len() {
        return;
    }
    players[from].decrement_score();
    players[to].increment_score();
    loc.set_owner(to);
    debug!(%at, from, to, ?cause, "flip");
    flips.push(Flip { at, from, to, cause });
}

/// Spread one wave from each card matched by Same or Plus, including matches
/// the challenger already owned: every opposing neighbor it beats on raw rank
/// also flips. Cascades stop after this wave.
fn combo_from(
    board: &mut Board,
    players: &mut [Player],
    sources: &[Coord],
    owner: usize,
    flips: &mut Vec<Flip>,
) {
    for &src in sources {
        for target in board.combo_neighbors(src) {
            let opposing = board
                .location(target)
                .and_then(|l| l.owner())
                .is_some_and(|o| o != owner);
            if opposing {
                flip(board, players, target, owner, FlipCause::Combo, flips);
            }
        }
    }
}

/// Neighbors of the challenger whose raw rank matches on the shared edge,
/// provided at least two match and one occupied neighbor is opposing.
/// Walls count toward the two but are never returned.
fn same_targets(board: &Board, at: Coord, owner: usize) -> Vec<Coord> {
    let Some(challenger) = board.location(at) else {
        return Vec::new();
    };
    let mut matches = 0usize;
    let mut targets = Vec::new();
    let mut any_opposing = false;
    for (dir, n) in board.neighbors_of(at) {
        if !n.is_occupied() {
            continue;
        }
        if n.owner().is_some_and(|o| o != owner) {
            any_opposing = true;
        }
        if challenger.ranks_equal(n, dir) {
            matches += 1;
            if let Some(c) = n.coord() {
                targets.push(c);
            }
        }
    }
    if matches >= 2 && any_opposing {
        targets
    } else {
        Vec::new()
    }
}

/// Owned neighbors grouped by the raw-rank sum across the shared edge. A group
/// qualifies with two or more members, at least two of them opposing; every
/// member of a qualifying group is returned.
fn plus_targets(board: &Board, at: Coord, owner: usize) -> Vec<Coord> {
    let Some(challenger) = board.location(at) else {
        return Vec::new();
    };
    // sum -> (members, opposing members)
    let mut groups: BTreeMap<i16, (Vec<Coord>, usize)> = BTreeMap::new();
    for (dir, n) in board.neighbors_of(at) {
        let Some(o) = n.owner() else {
            continue;
        };
        let (Some(sum), Some(c)) = (challenger.rank_sum(n, dir), n.coord()) else {
            continue;
        };
        let group = groups.entry(sum).or_default();
        group.0.push(c);
        if o != owner {
            group.1 += 1;
        }
    }
    groups
        .into_values()
        .filter(|(members, opposing)| members.len() >= 2 && *opposing >= 2)
        .flat_map(|(members, _)| members)
        .collect()
}

/// Neighbors the challenger beats outright on elementally adjusted rank.
fn basic_targets(board: &Board, at: Coord, owner: usize) -> Vec<Coord> {
    let Some(challenger) = board.location(at) else {
        return Vec::new();
    };
    let rules = board.rules();
    board
        .neighbors_of(at)
        .into_iter()
        .filter(|(_, n)| n.is_occupied() && n.owner().is_some_and(|o| o != owner))
        .filter(|(dir, n)| challenger.can_flip(n, *dir, rules))
        .filter_map(|(_, n)| n.coord())
        .collect()
}

/// Apply every enabled rule for the card just placed at `at`.
///
/// Precedence is fixed: Same, its combo wave, Plus, its combo wave, then the
/// basic comparison, which always runs last.
pub fn handle_card_placement(board: &mut Board, players: &mut [Player], at: Coord) -> Vec<Flip> {
    let mut flips: Vec<Flip> = Vec::new();
    let Some(owner) = board.location(at).and_then(|l| l.owner()) else {
        // Empty cells and walls never start a capture.
        return flips;
    };
    let rules = *board.rules();

    if rules.same {
        let targets = same_targets(board, at, owner);
        for &target in &targets {
            flip(board, players, target, owner, FlipCause::Same, &mut flips);
        }
        if rules.combo() {
            combo_from(board, players, &targets, owner, &mut flips);
        }
    }

    if rules.plus {
        let targets = plus_targets(board, at, owner);
        for &target in &targets {
            flip(board, players, target, owner, FlipCause::Plus, &mut flips);
        }
        if rules.combo() {
            combo_from(board, players, &targets, owner, &mut flips);
        }
    }

    for target in basic_targets(board, at, owner) {
        flip(board, players, target, owner, FlipCause::Basic, &mut flips);
    }

    flips
}
