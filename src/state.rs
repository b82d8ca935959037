use rand::Rng;

use crate::board::Board;
use crate::cards::Card;
use crate::engine::apply::PlacementReport;
use crate::error::{GameError, Result};
use crate::player::Player;
use crate::rules::Rules;
use crate::types::{Coord, Element};

/// A move: which card from the mover's hand goes to which cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub card_index: usize,
    pub at: Coord,
}

impl Action {
    #[inline]
    pub const fn new(card_index: usize, at: Coord) -> Self {
        Self { card_index, at }
    }
}

/// Board, players and whose turn it is.
///
/// Plain data: `clone()` is a full, independent deep copy. Location owners are
/// player indices, so a copied board already points at the copied players.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    players: Vec<Player>,
    current: usize,
}

impl GameState {
    /// Seat one player per hand and pick a random first player.
    pub fn new<R: Rng + ?Sized>(
        rules: Rules,
        width: usize,
        height: usize,
        hands: Vec<Vec<Card>>,
        rng: &mut R,
    ) -> Result<Self> {
        if hands.is_empty() {
            return Err(GameError::Config("a game needs at least one player".to_string()));
        }
        let board = Board::new(width, height, rules, rng);
        let first = rng.gen_range(0..hands.len());
        Self::from_parts(board, seat_players(hands), first)
    }

    /// Standard 3x3 game with fixed cell elements (row-major) and a fixed first player.
    pub fn with_hands(
        rules: Rules,
        hands: Vec<Vec<Card>>,
        cell_elements: Option<[Option<Element>; 9]>,
        first: usize,
    ) -> Result<Self> {
        let elements = cell_elements.unwrap_or([None; 9]);
        let board = Board::with_elements(3, 3, rules, &elements);
        Self::from_parts(board, seat_players(hands), first)
    }

    /// Assemble a state from existing parts. Player indices must match their positions.
    pub fn from_parts(board: Board, players: Vec<Player>, current: usize) -> Result<Self> {
        if current >= players.len() {
            return Err(GameError::UnknownPlayer(current));
        }
        if let Some((pos, p)) = players.iter().enumerate().find(|(i, p)| p.index() != *i) {
            return Err(GameError::Config(format!(
                "player at position {pos} has index {}",
                p.index()
            )));
        }
        Ok(Self {
            board,
            players,
            current,
        })
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        self.board.rules()
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Hand the turn to the next seat, round-robin.
    #[inline]
    pub fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Legal actions for `player`: every hand card against every free cell,
    /// cards in hand order, cells row-major.
    pub fn legal_actions_for(&self, player: usize) -> Vec<Action> {
        let Some(p) = self.players.get(player) else {
            return Vec::new();
        };
        let free = self.board.free_spaces();
        let mut actions = Vec::with_capacity(p.hand().len() * free.len());
        for card_index in 0..p.hand().len() {
            for &at in &free {
                actions.push(Action::new(card_index, at));
            }
        }
        actions
    }

    #[inline]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.legal_actions_for(self.current)
    }

    /// Reject an action before it can reach the board.
    pub fn validate(&self, player: usize, action: Action) -> Result<()> {
        let p = self.players.get(player).ok_or(GameError::UnknownPlayer(player))?;
        if action.card_index >= p.hand().len() {
            return Err(GameError::CardNotInHand {
                player,
                card_index: action.card_index,
            });
        }
        match self.board.location(action.at) {
            None => Err(GameError::out_of_bounds(action.at)),
            Some(l) if l.is_occupied() => Err(GameError::occupied(action.at)),
            Some(_) => Ok(()),
        }
    }

    /// Play `action` for `player` without moving the turn on.
    pub fn place_action(&mut self, player: usize, action: Action) -> Result<PlacementReport> {
        self.validate(player, action)?;
        let card = self.players[player]
            .play_card(action.card_index)
            .ok_or(GameError::CardNotInHand {
                player,
                card_index: action.card_index,
            })?;
        self.board.place(&mut self.players, player, card, action.at)
    }

    /// Play `action` for the current player, then pass the turn.
    pub fn apply_action(&mut self, action: Action) -> Result<PlacementReport> {
        let report = self.place_action(self.current, action)?;
        self.advance_turn();
        Ok(report)
    }

    /// Independent copy with `action` played for `player`. The turn is not advanced.
    pub fn generate_successor(&self, player: usize, action: Action) -> Result<GameState> {
        let mut next = self.duplicate();
        next.place_action(player, action)?;
        Ok(next)
    }

    #[inline]
    pub fn duplicate(&self) -> GameState {
        self.clone()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.board.is_full()
    }

    /// The player with the strictly highest score, or None on a tie for first.
    pub fn winner(&self) -> Option<usize> {
        let best = self.players.iter().map(Player::score).max()?;
        let mut leaders = self.players.iter().filter(|p| p.score() == best);
        match (leaders.next(), leaders.next()) {
            (Some(p), None) => Some(p.index()),
            _ => None,
        }
    }

    /// Every player holds the same score.
    pub fn scores_tied(&self) -> bool {
        self.players.windows(2).all(|w| w[0].score() == w[1].score())
    }

    /// Clear the board for a sudden-death round; placed cards return to the
    /// hands they came from.
    pub fn reset_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.reset(&mut self.players, rng);
    }
}

fn seat_players(hands: Vec<Vec<Card>>) -> Vec<Player> {
    hands
        .into_iter()
        .enumerate()
        .map(|(i, hand)| Player::with_hand(i, hand))
        .collect()
}
