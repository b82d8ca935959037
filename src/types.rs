use serde::{Deserialize, Serialize};

/// Elemental affinity of a card or a board cell. "No element" is `Option::None`
/// wherever an element is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Element {
    Fire,
    Earth,
    Ice,
    Thunder,
    Holy,
    Poison,
    Wind,
    Water,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::Fire,
        Element::Earth,
        Element::Ice,
        Element::Thunder,
        Element::Holy,
        Element::Poison,
        Element::Wind,
        Element::Water,
    ];

    /// Single character used when drawing a cell or card.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Element::Fire => 'F',
            Element::Earth => 'E',
            Element::Ice => 'I',
            Element::Thunder => 'T',
            Element::Holy => 'H',
            Element::Poison => 'P',
            Element::Wind => 'W',
            Element::Water => '~',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    Top,
    Bottom,
    Left,
    Right,
}

impl Dir {
    #[inline]
    pub fn all() -> [Dir; 4] {
        [Dir::Top, Dir::Bottom, Dir::Left, Dir::Right]
    }

    #[inline]
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Top => Dir::Bottom,
            Dir::Bottom => Dir::Top,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Slot of this direction in `[top, bottom, left, right]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Dir::Top => 0,
            Dir::Bottom => 1,
            Dir::Left => 2,
            Dir::Right => 3,
        }
    }
}

/// Grid coordinates; `x` is the column, `y` the row, (0, 0) is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Coordinates one step away in `dir`, or None when that would leave the grid.
    #[inline]
    pub fn step(self, dir: Dir, width: usize, height: usize) -> Option<Coord> {
        match dir {
            Dir::Top if self.y > 0 => Some(Coord::new(self.x, self.y - 1)),
            Dir::Bottom if self.y + 1 < height => Some(Coord::new(self.x, self.y + 1)),
            Dir::Left if self.x > 0 => Some(Coord::new(self.x - 1, self.y)),
            Dir::Right if self.x + 1 < width => Some(Coord::new(self.x + 1, self.y)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
