use crate::state::GameState;

/// Score margin of `player` over the strongest other player.
/// With two players this is simply `mine - theirs`.
#[inline]
pub fn score_margin(state: &GameState, player: usize) -> i32 {
    let mine = state.player(player).map_or(0, |p| p.score());
    let best_other = state
        .players()
        .iter()
        .filter(|p| p.index() != player)
        .map(|p| p.score())
        .max()
        .unwrap_or(0);
    mine - best_other
}

/// Number of board cells currently owned by `player`.
#[inline]
pub fn owned_cells(state: &GameState, player: usize) -> usize {
    state
        .board
        .iter()
        .filter(|l| l.owner() == Some(player))
        .count()
}

/// Sum of all scores. Stays equal to the number of cards dealt.
#[inline]
pub fn total_score(state: &GameState) -> i32 {
    state.players().iter().map(|p| p.score()).sum()
}
