use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{Card, CardsDb};
use crate::rules::Rules;
use crate::types::{Coord, Dir, Element};

/// Value reported for an empty location.
pub const EMPTY: i16 = -1;

/// A link from a location to whatever lies across one of its edges.
///
/// Links are keys into the owning board's arena, never references, so a
/// board can be cloned without rewiring anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    Cell(Coord),
    /// Synthetic edge stand-in, present only under Same Wall.
    Wall,
}

/// One cell of the grid, or the board's wall stand-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    coord: Option<Coord>,
    card: Option<Card>,
    owner: Option<usize>,
    placed_by: Option<usize>,
    element: Option<Element>,
    // [top, bottom, left, right], see Dir::index
    neighbors: [Option<Neighbor>; 4],
}

impl Location {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord: Some(coord),
            card: None,
            owner: None,
            placed_by: None,
            element: None,
            neighbors: [None; 4],
        }
    }

    /// Permanently occupied, ownerless location with rank 10 on every side.
    pub fn wall() -> Self {
        Self {
            coord: None,
            card: Some(CardsDb::wall_card()),
            owner: None,
            placed_by: None,
            element: None,
            neighbors: [None; 4],
        }
    }

    #[inline]
    pub fn coord(&self) -> Option<Coord> {
        self.coord
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.coord.is_none()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.card.is_some()
    }

    #[inline]
    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    /// Current owner; only meaningful while occupied. Walls have none.
    #[inline]
    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    /// Player whose hand the card came from. Unchanged by flips.
    #[inline]
    pub fn placed_by(&self) -> Option<usize> {
        self.placed_by
    }

    #[inline]
    pub fn element(&self) -> Option<Element> {
        self.element
    }

    #[inline]
    pub fn neighbor(&self, dir: Dir) -> Option<Neighbor> {
        self.neighbors[dir.index()]
    }

    /// Linked neighbors in `Dir::all()` order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Dir, Neighbor)> + '_ {
        Dir::all()
            .into_iter()
            .filter_map(move |d| self.neighbor(d).map(|n| (d, n)))
    }

    #[inline]
    pub(crate) fn link(&mut self, dir: Dir, neighbor: Option<Neighbor>) {
        self.neighbors[dir.index()] = neighbor;
    }

    /// Occupy this location. The caller checks that it is empty.
    pub(crate) fn place(&mut self, player: usize, card: Card) {
        debug_assert!(!self.is_occupied(), "place on an occupied location");
        self.card = Some(card);
        self.owner = Some(player);
        self.placed_by = Some(player);
    }

    #[inline]
    pub(crate) fn set_owner(&mut self, player: usize) {
        self.owner = Some(player);
    }

    /// Empty the location, handing back the card and the player who placed it.
    pub(crate) fn clear(&mut self) -> Option<(usize, Card)> {
        let card = self.card.take();
        let placed_by = self.placed_by.take();
        self.owner = None;
        placed_by.zip(card)
    }

    #[inline]
    pub(crate) fn set_element(&mut self, element: Option<Element>) {
        self.element = element;
    }

    /// Draw this location's elemental tag: a fair coin, then a uniform element.
    pub(crate) fn assign_element<R: Rng + ?Sized>(&mut self, rules: &Rules, rng: &mut R) {
        self.element = if rules.elemental && rng.gen_bool(0.5) {
            Element::ALL.choose(rng).copied()
        } else {
            None
        };
    }

    /// Rank facing `dir` with no elemental adjustment, or [`EMPTY`].
    #[inline]
    pub fn raw_rank(&self, dir: Dir) -> i16 {
        self.card.as_ref().map_or(EMPTY, |c| i16::from(c.rank(dir)))
    }

    /// Rank facing `dir` adjusted by the elemental rule, or [`EMPTY`].
    pub fn location_value(&self, dir: Dir, rules: &Rules) -> i16 {
        let Some(card) = self.card.as_ref() else {
            return EMPTY;
        };
        let rank = i16::from(card.rank(dir));
        if !rules.elemental {
            return rank;
        }
        match self.element {
            None => rank,
            Some(e) if card.element == Some(e) => rank + 1,
            Some(_) => rank - 1,
        }
    }

    /// Two handles name the same grid cell. Walls are never the same cell.
    #[inline]
    pub fn is_same_cell(&self, other: &Location) -> bool {
        self.coord.is_some() && self.coord == other.coord
    }

    /// Whether this location beats `neighbor` across the edge facing `dir`.
    pub fn can_flip(&self, neighbor: &Location, dir: Dir, rules: &Rules) -> bool {
        if self.is_same_cell(neighbor) {
            return false;
        }
        self.location_value(dir, rules) > neighbor.location_value(dir.opposite(), rules)
    }

    /// Raw ranks on the shared edge are equal (Same rule).
    pub fn ranks_equal(&self, neighbor: &Location, dir: Dir) -> bool {
        if self.is_same_cell(neighbor) || !self.is_occupied() || !neighbor.is_occupied() {
            return false;
        }
        self.raw_rank(dir) == neighbor.raw_rank(dir.opposite())
    }

    /// Sum of raw ranks on the shared edge (Plus rule).
    pub fn rank_sum(&self, neighbor: &Location, dir: Dir) -> Option<i16> {
        if self.is_same_cell(neighbor) || !self.is_occupied() || !neighbor.is_occupied() {
            return None;
        }
        Some(self.raw_rank(dir) + neighbor.raw_rank(dir.opposite()))
    }

    /// Raw rank on the shared edge is strictly greater (Combo rule).
    pub fn rank_greater(&self, neighbor: &Location, dir: Dir) -> bool {
        if self.is_same_cell(neighbor) || !self.is_occupied() || !neighbor.is_occupied() {
            return false;
        }
        self.raw_rank(dir) > neighbor.raw_rank(dir.opposite())
    }
}
