use crate::error::{GameError, Result};
use crate::types::{Dir, Element};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN_CARDS: &str = include_str!("../data/cards.json");

/// Cards at or above this level may appear at most once across all hands.
pub const UNIQUE_FROM_LEVEL: u8 = 8;
/// Spread of the dealing distribution, in catalog positions.
const DEAL_STD_DEV: f64 = 15.0;
const MAX_DEAL_ATTEMPTS: usize = 100_000;

/// An immutable playing card. Cards compare equal by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub level: u8,
    pub top: u8,
    pub right: u8,
    pub bottom: u8,
    pub left: u8,
    #[serde(default)]
    pub element: Option<Element>,
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Card {}

impl Card {
    pub fn new(
        name: impl Into<String>,
        top: u8,
        right: u8,
        bottom: u8,
        left: u8,
        element: Option<Element>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            level: 0,
            top,
            right,
            bottom,
            left,
            element,
        }
    }

    #[inline]
    pub fn rank(&self, dir: Dir) -> u8 {
        match dir {
            Dir::Top => self.top,
            Dir::Bottom => self.bottom,
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    /// Printed form of a rank: digits for 1..=9, `A` for 10.
    #[inline]
    pub fn rank_glyph(&self, dir: Dir) -> char {
        rank_glyph(self.rank(dir))
    }
}

#[inline]
pub fn rank_glyph(rank: u8) -> char {
    match rank {
        1..=9 => char::from(b'0' + rank),
        _ => 'A',
    }
}

#[derive(Debug, Default)]
pub struct CardsDb {
    by_id: Vec<Option<Card>>,         // index by id (len = max_id + 1)
    name_to_id: HashMap<String, u16>, // case-sensitive names as in data
    max_id: u16,
    count: usize,
}

impl CardsDb {
    /// The standard 110-card catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        cards_from_json_str(BUILTIN_CARDS)
    }

    #[inline]
    pub fn get(&self, id: u16) -> Option<&Card> {
        self.by_id.get(id as usize).and_then(|c| c.as_ref())
    }

    #[inline]
    pub fn by_name(&self, name: &str) -> Option<&Card> {
        self.name_to_id.get(name).and_then(|&id| self.get(id))
    }

    #[inline]
    pub fn max_id(&self) -> u16 {
        self.max_id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Cards in ascending id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.by_id.iter().filter_map(|o| o.as_ref())
    }

    /// The edge stand-in used by the Same Wall rule.
    pub fn wall_card() -> Card {
        Card::new("WALL", 10, 10, 10, 10, None)
    }

    /// Deal `players` hands of `hand_size` cards.
    ///
    /// Catalog positions are drawn from a bell-shaped weighting centred on the
    /// middle of the catalog, so mid-level cards are the most common. A card of
    /// level [`UNIQUE_FROM_LEVEL`] or above (and PuPu) is redrawn if it was
    /// already dealt.
    pub fn deal_cards<R: Rng + ?Sized>(
        &self,
        players: usize,
        hand_size: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<Card>>> {
        let pool: Vec<&Card> = self.iter().collect();
        let needed = players * hand_size;
        let repeatable = pool.iter().filter(|c| !is_unique(c)).count();
        if repeatable == 0 && needed > pool.len() {
            return Err(GameError::Catalog(format!(
                "cannot deal {needed} cards from {} unique cards",
                pool.len()
            )));
        }

        let mean = pool.len() as f64 / 2.0;
        let weights: Vec<f64> = (0..pool.len())
            .map(|i| {
                let z = (i as f64 - mean) / DEAL_STD_DEV;
                (-0.5 * z * z).exp()
            })
            .collect();
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| GameError::Catalog(format!("invalid deal weights: {e}")))?;

        let mut dealt: Vec<Card> = Vec::with_capacity(needed);
        let mut attempts = 0usize;
        while dealt.len() < needed {
            attempts += 1;
            if attempts > MAX_DEAL_ATTEMPTS {
                return Err(GameError::Catalog("dealing did not converge".to_string()));
            }
            let card = pool[dist.sample(rng)];
            if is_unique(card) && dealt.contains(card) {
                continue;
            }
            dealt.push(card.clone());
        }

        Ok(dealt.chunks(hand_size).map(<[Card]>::to_vec).collect())
    }
}

#[inline]
fn is_unique(card: &Card) -> bool {
    card.level >= UNIQUE_FROM_LEVEL || card.name == "PuPu"
}

fn validate_card(card: &Card) -> Result<()> {
    let within = |v: u8| (1..=10).contains(&v);
    if !(within(card.top) && within(card.right) && within(card.bottom) && within(card.left)) {
        return Err(GameError::Catalog(format!(
            "Card id {} '{}' has invalid side values (must be 1..=10)",
            card.id, card.name
        )));
    }
    Ok(())
}

/// Load cards from a JSON file (runtime), building a dense id index and name lookup.
pub fn load_cards_from_json<P: AsRef<Path>>(path: P) -> Result<CardsDb> {
    let data = fs::read_to_string(path.as_ref())?;
    cards_from_json_str(&data)
}

pub fn cards_from_json_str(data: &str) -> Result<CardsDb> {
    let raw: Vec<Card> = serde_json::from_str(data)?;

    if raw.is_empty() {
        return Err(GameError::Catalog("No cards in JSON".to_string()));
    }

    // Validate and compute max id
    let mut max_id: u16 = 0;
    for c in &raw {
        validate_card(c)?;
        max_id = max_id.max(c.id);
    }

    let mut by_id: Vec<Option<Card>> = vec![None; (max_id as usize) + 1];
    let mut name_to_id: HashMap<String, u16> = HashMap::with_capacity(raw.len());

    for c in raw {
        let id = c.id;
        let name = c.name.clone();

        if let Some(existing) = by_id.get(id as usize).and_then(|x| x.as_ref()) {
            return Err(GameError::Catalog(format!(
                "Duplicate card id {} ('{}' and '{}')",
                id, existing.name, name
            )));
        }
        if let Some(prev) = name_to_id.insert(name.clone(), id) {
            return Err(GameError::Catalog(format!(
                "Duplicate card name '{}' for ids {} and {}",
                name, prev, id
            )));
        }
        by_id[id as usize] = Some(c);
    }

    let count = by_id.iter().filter(|c| c.is_some()).count();

    Ok(CardsDb {
        by_id,
        name_to_id,
        max_id,
        count,
    })
}
