use triple_triad::{total_score, Action, Card, Coord, FlipCause, GameState, Rules};

fn card(name: &str, top: u8, right: u8, bottom: u8, left: u8) -> Card {
    Card::new(name, top, right, bottom, left, None)
}

fn at(x: usize, y: usize) -> Coord {
    Coord::new(x, y)
}

fn owner(state: &GameState, x: usize, y: usize) -> Option<usize> {
    state.board.location(at(x, y)).and_then(|l| l.owner())
}

/// A: Mesmerize at (0,1); B: Iron Giant at (1,0); A: Cactuar into the centre.
/// Cactuar's top 6 matches Iron Giant's bottom 6 and its left 3 matches
/// Mesmerize's right 3.
fn same_setup(rules: Rules) -> (GameState, triple_triad::PlacementReport) {
    let hands = vec![
        vec![card("Mesmerize", 5, 3, 3, 4), card("Cactuar", 6, 2, 6, 3)],
        vec![card("Iron Giant", 6, 5, 6, 5), card("Geezard", 1, 4, 1, 5)],
    ];
    let mut state = GameState::with_hands(rules, hands, None, 0).unwrap();
    state.apply_action(Action::new(0, at(0, 1))).unwrap();
    state.apply_action(Action::new(0, at(1, 0))).unwrap();
    let report = state.apply_action(Action::new(0, at(1, 1))).unwrap();
    (state, report)
}

#[test]
fn same_flips_every_matching_neighbor() {
    let (state, report) = same_setup(Rules::new(false, true, false, false, false));

    assert_eq!(owner(&state, 1, 0), Some(0), "top neighbor flips by Same");
    assert_eq!(owner(&state, 0, 1), Some(0), "own left neighbor stays with the challenger");
    let same: Vec<_> = report.flipped(FlipCause::Same).collect();
    assert_eq!(same.len(), 1, "only the opposing card actually changes hands");
    assert_eq!(same[0].at, at(1, 0));
    assert_eq!(state.player(0).unwrap().score(), 3);
    assert_eq!(state.player(1).unwrap().score(), 1);
    assert_eq!(total_score(&state), 4);
}

#[test]
fn without_same_equal_ranks_do_not_flip() {
    let (state, report) = same_setup(Rules::basic_only());
    assert!(report.flips.is_empty());
    assert_eq!(owner(&state, 1, 0), Some(1));
}

#[test]
fn same_needs_two_matches() {
    let hands = vec![vec![card("Cactuar", 6, 2, 6, 3)], vec![card("Iron Giant", 6, 5, 6, 5)]];
    let mut state = GameState::with_hands(Rules::new(false, true, false, false, false), hands, None, 1).unwrap();
    state.apply_action(Action::new(0, at(1, 0))).unwrap();
    let report = state.apply_action(Action::new(0, at(1, 1))).unwrap();
    assert!(report.flips.is_empty());
    assert_eq!(owner(&state, 1, 0), Some(1));
}

/// B: Guard (2,0), Minion (2,1), Tail (2,2); A: two pebbles on the left, then
/// Squall at (1,0). Squall's top 10 meets the wall and its right 4 meets
/// Guard's left 4.
fn wall_setup(rules: Rules) -> (GameState, triple_triad::PlacementReport) {
    let hands = vec![
        vec![card("Pebble A", 1, 1, 1, 1), card("Pebble B", 1, 1, 1, 1), card("Squall", 10, 4, 6, 9)],
        vec![card("Guard", 1, 1, 5, 4), card("Minion", 2, 1, 9, 1), card("Tail", 1, 1, 1, 1)],
    ];
    let mut state = GameState::with_hands(rules, hands, None, 1).unwrap();
    state.apply_action(Action::new(0, at(2, 0))).unwrap(); // B Guard
    state.apply_action(Action::new(0, at(0, 2))).unwrap(); // A Pebble A
    state.apply_action(Action::new(0, at(2, 1))).unwrap(); // B Minion
    state.apply_action(Action::new(0, at(0, 1))).unwrap(); // A Pebble B
    state.apply_action(Action::new(0, at(2, 2))).unwrap(); // B Tail
    let report = state.apply_action(Action::new(0, at(1, 0))).unwrap(); // A Squall
    (state, report)
}

#[test]
fn same_wall_counts_the_edge_as_a_match() {
    let (state, report) = wall_setup(Rules::new(false, true, true, false, false));
    assert_eq!(owner(&state, 2, 0), Some(0), "Guard flips by Same Wall + equality");
    assert_eq!(report.flipped(FlipCause::Same).count(), 1);
    // Walls are never flip targets.
    assert!(report.flips.iter().all(|f| f.from != f.to));
}

#[test]
fn same_without_wall_ignores_the_edge() {
    let (state, report) = wall_setup(Rules::new(false, true, false, false, false));
    assert!(report.flips.is_empty());
    assert_eq!(owner(&state, 2, 0), Some(1));
}

#[test]
fn combo_spreads_one_wave_from_same() {
    let (state, report) = wall_setup(Rules::new(false, true, true, false, false));
    // Guard's bottom 5 beats Minion's top 2.
    assert_eq!(owner(&state, 2, 1), Some(0), "Minion flips by Combo");
    let combo: Vec<_> = report.flipped(FlipCause::Combo).collect();
    assert_eq!(combo.len(), 1);
    assert_eq!(combo[0].at, at(2, 1));
    // Minion's bottom 9 would beat Tail's top 1, but the cascade stops after one wave.
    assert_eq!(owner(&state, 2, 2), Some(1), "Tail is beyond the combo wave");
    assert_eq!(state.player(0).unwrap().score(), 5);
    assert_eq!(state.player(1).unwrap().score(), 1);
}

/// B: Top at (1,0) with bottom 9, Right at (2,1) with left 2; A: Quezacotl
/// into the centre with top 2 and right 9. Both edges sum to 11.
fn plus_setup(rules: Rules) -> (GameState, triple_triad::PlacementReport) {
    let hands = vec![
        vec![card("Pebble", 1, 1, 1, 1), card("Quezacotl", 2, 9, 9, 4)],
        vec![card("Top", 1, 1, 9, 1), card("Right", 1, 1, 1, 2)],
    ];
    let mut state = GameState::with_hands(rules, hands, None, 1).unwrap();
    state.apply_action(Action::new(0, at(1, 0))).unwrap(); // B Top
    state.apply_action(Action::new(0, at(0, 2))).unwrap(); // A Pebble
    state.apply_action(Action::new(0, at(2, 1))).unwrap(); // B Right
    let report = state.apply_action(Action::new(0, at(1, 1))).unwrap(); // A Quezacotl
    (state, report)
}

#[test]
fn plus_flips_equal_sums() {
    let (state, report) = plus_setup(Rules::new(false, false, false, true, false));
    assert_eq!(owner(&state, 1, 0), Some(0), "top flips by Plus although 2 < 9");
    assert_eq!(owner(&state, 2, 1), Some(0), "right flips by Plus");
    assert_eq!(report.flipped(FlipCause::Plus).count(), 2);
    assert_eq!(report.flipped(FlipCause::Basic).count(), 0);
}

#[test]
fn without_plus_only_the_basic_comparison_applies() {
    let (state, report) = plus_setup(Rules::basic_only());
    assert_eq!(owner(&state, 1, 0), Some(1));
    assert_eq!(owner(&state, 2, 1), Some(0));
    assert_eq!(report.flipped(FlipCause::Basic).count(), 1);
}

#[test]
fn same_and_plus_together_match_plus_only_outcome() {
    let (state, _) = plus_setup(Rules::new(false, true, false, true, false));
    assert_eq!(owner(&state, 1, 0), Some(0));
    assert_eq!(owner(&state, 2, 1), Some(0));
    assert_eq!(total_score(&state), 4);
}

#[test]
fn plus_group_needs_two_opposing_members() {
    // A's own card at (1,0) and B's at (2,1) both sum to 11 with the challenger,
    // but only one member of that group is opposing.
    let hands = vec![
        vec![card("Own", 1, 1, 9, 1), card("Quezacotl", 2, 2, 9, 4)],
        vec![card("Right", 9, 1, 1, 9), card("Pebble", 1, 1, 1, 1)],
    ];
    let mut state = GameState::with_hands(Rules::new(false, false, false, true, false), hands, None, 0).unwrap();
    state.apply_action(Action::new(0, at(1, 0))).unwrap(); // A Own
    state.apply_action(Action::new(0, at(2, 1))).unwrap(); // B Right
    let report = state.apply_action(Action::new(0, at(1, 1))).unwrap(); // A Quezacotl
    assert!(report.flips.is_empty(), "{:?}", report.flips);
    assert_eq!(owner(&state, 2, 1), Some(1));
    assert_eq!(owner(&state, 1, 0), Some(0));
}

#[test]
fn combo_spreads_from_a_same_match_already_owned() {
    // Chal's top 6 matches Top's bottom 6 and its left 3 matches Own's right 3.
    // Own is already A's, yet it still seeds the combo wave: its top 9 beats
    // Corner's bottom 2.
    let hands = vec![
        vec![card("Own", 9, 3, 1, 1), card("Pebble", 1, 1, 1, 1), card("Chal", 6, 1, 1, 3)],
        vec![card("Corner", 1, 1, 2, 1), card("Top", 1, 1, 6, 1)],
    ];
    let mut state = GameState::with_hands(Rules::new(false, true, false, false, false), hands, None, 0).unwrap();
    state.apply_action(Action::new(0, at(0, 1))).unwrap(); // A Own
    state.apply_action(Action::new(0, at(0, 0))).unwrap(); // B Corner
    state.apply_action(Action::new(0, at(2, 2))).unwrap(); // A Pebble
    state.apply_action(Action::new(0, at(1, 0))).unwrap(); // B Top
    let report = state.apply_action(Action::new(0, at(1, 1))).unwrap(); // A Chal

    assert_eq!(owner(&state, 1, 0), Some(0), "Top flips by Same");
    assert_eq!(owner(&state, 0, 0), Some(0), "Corner flips by Combo from Own");
    let combo: Vec<_> = report.flipped(FlipCause::Combo).collect();
    assert_eq!(combo.len(), 1);
    assert_eq!(combo[0].at, at(0, 0));
    assert_eq!(report.flipped(FlipCause::Same).count(), 1, "Own changes no hands");
    assert_eq!(state.player(0).unwrap().score(), 5);
    assert_eq!(state.player(1).unwrap().score(), 0);
}

#[test]
fn combo_spreads_one_wave_from_plus() {
    // Quezacotl's top 2 + Top's bottom 9 and left 4 + Left's right 7 both make 11.
    // Top's right 8 then beats Link's left 3; Link's bottom 7 would beat Tail's
    // top 2, but that is a second wave.
    let hands = vec![
        vec![card("Quezacotl", 2, 1, 1, 4)],
        vec![
            card("Top", 1, 8, 9, 1),
            card("Left", 1, 7, 1, 1),
            card("Link", 1, 1, 7, 3),
            card("Tail", 2, 1, 1, 9),
        ],
    ];
    let mut state = GameState::with_hands(Rules::new(false, false, false, true, false), hands, None, 1).unwrap();
    for (x, y) in [(1, 0), (0, 1), (2, 0), (2, 1)] {
        state.place_action(1, Action::new(0, at(x, y))).unwrap();
    }
    state.advance_turn();
    let report = state.apply_action(Action::new(0, at(1, 1))).unwrap();

    assert_eq!(report.flipped(FlipCause::Plus).count(), 2);
    let combo: Vec<_> = report.flipped(FlipCause::Combo).collect();
    assert_eq!(combo.len(), 1);
    assert_eq!(combo[0].at, at(2, 0));
    assert_eq!(report.flipped(FlipCause::Basic).count(), 0);
    assert_eq!(owner(&state, 1, 0), Some(0));
    assert_eq!(owner(&state, 0, 1), Some(0));
    assert_eq!(owner(&state, 2, 0), Some(0), "Link flips by Combo");
    assert_eq!(owner(&state, 2, 1), Some(1), "Tail is beyond the combo wave");
    assert_eq!(state.player(0).unwrap().score(), 4);
    assert_eq!(state.player(1).unwrap().score(), 1);
}
