use std::cmp::Ordering;

use crate::cards::Card;

/// A seat at the table: fixed index, a hand, and a running score.
///
/// The score starts at the dealt hand size and moves by exactly one per flip,
/// so the sum over all players always equals the number of cards dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    index: usize,
    name: String,
    hand: Vec<Card>,
    score: i32,
}

impl Player {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            name: format!("Player {}", index + 1),
            hand: Vec::new(),
            score: 0,
        }
    }

    pub fn with_hand(index: usize, hand: Vec<Card>) -> Self {
        let mut p = Self::new(index);
        p.set_hand(hand);
        p
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Replace the hand; the score resets to the new hand size.
    pub fn set_hand(&mut self, cards: Vec<Card>) {
        self.hand = cards;
        self.reset_score();
    }

    /// Remove and return the card at `card_index`.
    pub fn play_card(&mut self, card_index: usize) -> Option<Card> {
        if card_index < self.hand.len() {
            Some(self.hand.remove(card_index))
        } else {
            None
        }
    }

    pub(crate) fn return_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn reset_score(&mut self) {
        self.score = i32::try_from(self.hand.len()).unwrap_or(i32::MAX);
    }

    #[inline]
    pub(crate) fn increment_score(&mut self) {
        self.score += 1;
    }

    #[inline]
    pub(crate) fn decrement_score(&mut self) {
        self.score -= 1;
    }
}

/// Order two players by score alone.
#[inline]
pub fn compare_scores(a: &Player, b: &Player) -> Ordering {
    a.score.cmp(&b.score)
}
