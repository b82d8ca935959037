use rand::Rng;
use tracing::debug;

use crate::cards::Card;
use crate::engine::apply::{handle_card_placement, PlacementReport};
use crate::error::{GameError, Result};
use crate::location::{Location, Neighbor};
use crate::player::Player;
use crate::rules::Rules;
use crate::types::{Coord, Dir, Element};

/// The playing grid: an arena of locations addressed by coordinates.
///
/// Neighbor links are wired once in the constructor. Cloning a board copies the
/// arena (and its wall stand-in) and the links stay valid because they are
/// coordinate keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    // Row-major: y * width + x
    cells: Vec<Location>,
    wall: Location,
    free: usize,
    rules: Rules,
}

impl Board {
    /// Build an empty board, drawing elemental tags from `rng`.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rules: Rules, rng: &mut R) -> Self {
        let mut board = Self::empty(width, height, rules);
        for loc in &mut board.cells {
            loc.assign_element(&board.rules, rng);
        }
        board
    }

    /// Build an empty board with explicit per-cell elements (row-major).
    /// Missing entries are treated as untagged.
    pub fn with_elements(width: usize, height: usize, rules: Rules, elements: &[Option<Element>]) -> Self {
        let mut board = Self::empty(width, height, rules);
        for (loc, elem) in board.cells.iter_mut().zip(elements.iter().copied()) {
            loc.set_element(elem);
        }
        board
    }

    fn empty(width: usize, height: usize, rules: Rules) -> Self {
        let rules = rules.normalized();
        let mut cells: Vec<Location> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Location::new(Coord::new(x, y))))
            .collect();

        // Wire neighbors after every location exists.
        for loc in &mut cells {
            let Some(at) = loc.coord() else { continue };
            for dir in Dir::all() {
                let link = match at.step(dir, width, height) {
                    Some(n) => Some(Neighbor::Cell(n)),
                    None if rules.same_wall => Some(Neighbor::Wall),
                    None => None,
                };
                loc.link(dir, link);
            }
        }

        Self {
            width,
            height,
            cells,
            wall: Location::wall(),
            free: width * height,
            rules,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    fn index(&self, at: Coord) -> Option<usize> {
        if at.x < self.width && at.y < self.height {
            Some(at.y * self.width + at.x)
        } else {
            None
        }
    }

    #[inline]
    pub fn location(&self, at: Coord) -> Option<&Location> {
        self.index(at).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn location_mut(&mut self, at: Coord) -> Option<&mut Location> {
        self.index(at).map(move |i| &mut self.cells[i])
    }

    /// Follow a neighbor link to its location.
    pub fn resolve(&self, neighbor: Neighbor) -> Option<&Location> {
        match neighbor {
            Neighbor::Cell(at) => self.location(at),
            Neighbor::Wall => Some(&self.wall),
        }
    }

    /// Linked neighbors of `at` with the direction pointing at them.
    pub fn neighbors_of(&self, at: Coord) -> Vec<(Dir, &Location)> {
        let Some(loc) = self.location(at) else {
            return Vec::new();
        };
        loc.neighbors()
            .filter_map(|(d, n)| self.resolve(n).map(|l| (d, l)))
            .collect()
    }

    /// Occupied grid neighbors whose shared-edge raw rank is strictly below
    /// the card at `at`: the frontier a combo cascade spreads into.
    pub fn combo_neighbors(&self, at: Coord) -> Vec<Coord> {
        let Some(loc) = self.location(at) else {
            return Vec::new();
        };
        self.neighbors_of(at)
            .into_iter()
            .filter(|(d, n)| !n.is_wall() && n.is_occupied() && loc.rank_greater(n, *d))
            .filter_map(|(_, n)| n.coord())
            .collect()
    }

    /// All locations, row-major.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.cells.iter()
    }

    /// One row of locations, left to right.
    pub fn row(&self, y: usize) -> &[Location] {
        if y >= self.height {
            return &[];
        }
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Coordinates of every unoccupied cell, row-major. This is the legal-move set.
    pub fn free_spaces(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|l| !l.is_occupied())
            .filter_map(Location::coord)
            .collect()
    }

    #[inline]
    pub fn free_space_count(&self) -> usize {
        self.free
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    #[inline]
    pub fn is_free(&self, at: Coord) -> bool {
        self.location(at).is_some_and(|l| !l.is_occupied())
    }

    /// Put `card` down for `player` and run the rule engine from there.
    ///
    /// Fails without touching the board or any score if `at` is outside the grid
    /// or already occupied.
    pub fn place(
        &mut self,
        players: &mut [Player],
        player: usize,
        card: Card,
        at: Coord,
    ) -> Result<PlacementReport> {
        if player >= players.len() {
            return Err(GameError::UnknownPlayer(player));
        }
        let loc = self.location_mut(at).ok_or_else(|| GameError::out_of_bounds(at))?;
        if loc.is_occupied() {
            return Err(GameError::occupied(at));
        }
        debug!(player, card = %card.name, %at, "placing card");
        loc.place(player, card);
        self.free -= 1;
        let flips = handle_card_placement(self, players, at);
        Ok(PlacementReport { at, player, flips })
    }

    /// Clear the grid for another round and redraw elemental tags.
    ///
    /// Under sudden death every placed card goes back to the hand it was played
    /// from. Scores then reset to hand sizes.
    pub fn reset<R: Rng + ?Sized>(&mut self, players: &mut [Player], rng: &mut R) {
        for loc in &mut self.cells {
            if let Some((placed_by, card)) = loc.clear() {
                if self.rules.sudden_death {
                    if let Some(p) = players.get_mut(placed_by) {
                        p.return_card(card);
                    }
                }
            }
            loc.assign_element(&self.rules, rng);
        }
        self.free = self.cells.iter().filter(|l| !l.is_occupied()).count();
        for p in players.iter_mut() {
            p.reset_score();
        }
    }

    /// Independent copy sharing no mutable state with `self`.
    #[inline]
    pub fn duplicate(&self) -> Board {
        self.clone()
    }
}
