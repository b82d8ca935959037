use triple_triad::search::{choose_action, search_depth, value};
use triple_triad::{
    Action, Agent, Card, CardsDb, Coord, FirstAvailableAgent, GameState, Rules, SearchAgent,
    SearchLimits,
};

fn card(name: &str, top: u8, right: u8, bottom: u8, left: u8) -> Card {
    Card::new(name, top, right, bottom, left, None)
}

#[test]
fn prefers_the_capturing_move() {
    // B has opened in the centre with a weak card; A holds a weak and a strong card.
    let hands = vec![
        vec![card("Weak", 1, 1, 1, 1), card("Strong", 9, 9, 9, 9)],
        vec![card("Target", 1, 1, 1, 1), card("Spare", 1, 1, 1, 1)],
    ];
    let mut state = GameState::with_hands(Rules::basic_only(), hands, None, 1).unwrap();
    state.apply_action(Action::new(0, Coord::new(1, 1))).unwrap();

    let outcome = choose_action(&state, 0, SearchLimits::default()).unwrap();
    assert_eq!(outcome.depth, 1, "9 % 8 free cells");
    // First adjacent cell in row-major order, with the strong card.
    assert_eq!(outcome.action, Action::new(1, Coord::new(1, 0)));
    assert_eq!(outcome.value, 400);
}

#[test]
fn ties_keep_the_first_action() {
    let hands = vec![
        vec![card("A", 5, 5, 5, 5), card("B", 5, 5, 5, 5)],
        vec![card("C", 5, 5, 5, 5), card("D", 5, 5, 5, 5)],
    ];
    let state = GameState::with_hands(Rules::basic_only(), hands, None, 0).unwrap();
    let outcome = choose_action(&state, 0, SearchLimits::default()).unwrap();
    assert_eq!(outcome.action, state.legal_actions()[0]);
}

#[test]
fn every_ply_maximises() {
    // After A's pebble goes into the corner, B could capture it with a 9.
    // A minimising opponent would score that -200; this search takes B's
    // most favourable reply for A instead.
    let hands = vec![vec![card("Pebble", 1, 1, 1, 1)], vec![card("Knight", 9, 9, 9, 9)]];
    let state = GameState::with_hands(Rules::basic_only(), hands, None, 0).unwrap();
    let succ = state
        .generate_successor(0, Action::new(0, Coord::new(0, 0)))
        .unwrap();
    assert_eq!(value(succ.clone(), 0, 0), 0);
    assert_eq!(value(succ, 0, 1), 0);
}

#[test]
fn search_leaves_the_live_state_untouched() {
    let catalog = CardsDb::builtin().unwrap();
    let hands: Vec<Vec<Card>> = [
        ["Geezard", "Funguar", "Bite Bug", "Red Bat", "Blobra"],
        ["Gayla", "Gesper", "Fastitocalon-F", "Blood Soul", "Caterchipillar"],
    ]
    .iter()
    .map(|names| {
        names
            .iter()
            .map(|n| catalog.by_name(n).unwrap().clone())
            .collect::<Vec<Card>>()
    })
    .collect();
    let mut state = GameState::with_hands(Rules::all_enabled(), hands, None, 0).unwrap();
    state.apply_action(Action::new(0, Coord::new(0, 0))).unwrap();
    state.apply_action(Action::new(0, Coord::new(2, 2))).unwrap();
    state.apply_action(Action::new(0, Coord::new(1, 1))).unwrap();
    state.apply_action(Action::new(0, Coord::new(2, 0))).unwrap();

    let before = state.clone();
    let outcome = choose_action(&state, 0, SearchLimits::default()).unwrap();
    assert_eq!(outcome.depth, search_depth(9, 5));
    assert!(outcome.nodes > 0);
    assert_eq!(state, before);
}

#[test]
fn depth_matches_free_spaces_at_every_decision() {
    let catalog = CardsDb::builtin().unwrap();
    let mut rng = triple_triad::rng_for_game(11, 0);
    let hands = catalog.deal_cards(2, 5, &mut rng).unwrap();
    let mut state = GameState::with_hands(Rules::basic_only(), hands, None, 0).unwrap();
    let mut searcher = SearchAgent::new(0);
    let mut other = FirstAvailableAgent;

    while !state.is_terminal() {
        let free = state.board.free_space_count();
        let action = if state.current_index() == 0 {
            let a = searcher.get_action(&state).unwrap();
            assert_eq!(searcher.last_outcome().unwrap().depth, 9 % free);
            a
        } else {
            other.get_action(&state).unwrap()
        };
        state.apply_action(action).unwrap();
    }
}

#[test]
fn refuses_to_move_out_of_turn() {
    let hands = vec![vec![card("A", 5, 5, 5, 5)], vec![card("B", 5, 5, 5, 5)]];
    let state = GameState::with_hands(Rules::basic_only(), hands, None, 1).unwrap();
    assert!(choose_action(&state, 0, SearchLimits::default()).is_err());
    assert!(SearchAgent::new(0).get_action(&state).is_err());
}

#[test]
fn zero_time_budget_still_returns_an_action() {
    let hands = vec![
        vec![card("A", 5, 5, 5, 5), card("B", 3, 7, 2, 8)],
        vec![card("C", 5, 5, 5, 5), card("D", 6, 1, 6, 1)],
    ];
    let state = GameState::with_hands(Rules::basic_only(), hands, None, 0).unwrap();
    let limits = SearchLimits {
        time_ms: Some(0),
        ..SearchLimits::default()
    };
    let outcome = choose_action(&state, 0, limits).unwrap();
    assert_eq!(outcome.action, state.legal_actions()[0]);
}
