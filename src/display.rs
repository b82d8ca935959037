use std::io::Write;

use tracing::info;

use crate::cards::Card;
use crate::state::GameState;
use crate::types::{Coord, Dir, Element};

/// Read-only snapshot of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub at: Coord,
    pub element: Option<Element>,
    pub owner: Option<usize>,
    pub card: Option<Card>,
}

/// Read-only snapshot of a game, handed to displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub current: usize,
    pub names: Vec<String>,
    pub hands: Vec<Vec<Card>>,
    pub scores: Vec<i32>,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellView>,
    pub free_spaces: usize,
}

impl GameView {
    pub fn of(state: &GameState) -> Self {
        let players = state.players();
        Self {
            current: state.current_index(),
            names: players.iter().map(|p| p.name().to_string()).collect(),
            hands: players.iter().map(|p| p.hand().to_vec()).collect(),
            scores: players.iter().map(|p| p.score()).collect(),
            width: state.board.width(),
            height: state.board.height(),
            cells: state
                .board
                .iter()
                .filter_map(|l| {
                    l.coord().map(|at| CellView {
                        at,
                        element: l.element(),
                        owner: l.owner(),
                        card: l.card().cloned(),
                    })
                })
                .collect(),
            free_spaces: state.board.free_space_count(),
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Option<usize>,
    pub scores: Vec<i32>,
    pub rounds: u32,
}

/// Presentation collaborator. Nothing it does feeds back into the game.
pub trait Display {
    fn show_turn(&mut self, view: &GameView);
    fn show_end(&mut self, view: &GameView, outcome: &GameOutcome);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn show_turn(&mut self, _view: &GameView) {}
    fn show_end(&mut self, _view: &GameView, _outcome: &GameOutcome) {}
}

/// Emits each turn as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDisplay;

impl Display for LogDisplay {
    fn show_turn(&mut self, view: &GameView) {
        info!(
            current = view.current,
            scores = ?view.scores,
            free_spaces = view.free_spaces,
            "turn"
        );
    }

    fn show_end(&mut self, _view: &GameView, outcome: &GameOutcome) {
        info!(winner = ?outcome.winner, scores = ?outcome.scores, rounds = outcome.rounds, "game over");
    }
}

/// Plain-text board and hands, written to any `Write`.
#[derive(Debug)]
pub struct TextDisplay<W: Write> {
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, view: &GameView) -> std::io::Result<()> {
        for y in 0..view.height {
            let row: Vec<&CellView> = view.cells.iter().filter(|c| c.at.y == y).collect();
            let lines: [Vec<String>; 3] = [
                row.iter().map(|c| cell_line(c, 0)).collect(),
                row.iter().map(|c| cell_line(c, 1)).collect(),
                row.iter().map(|c| cell_line(c, 2)).collect(),
            ];
            for line in lines {
                writeln!(self.out, "{}", line.join(" "))?;
            }
            writeln!(self.out)?;
        }
        for (i, name) in view.names.iter().enumerate() {
            let marker = if i == view.current { '>' } else { ' ' };
            let hand: Vec<String> = view.hands[i]
                .iter()
                .enumerate()
                .map(|(k, c)| format!("{}:{}", k + 1, card_glyphs(c)))
                .collect();
            writeln!(self.out, "{marker} {name} [{}] {}", view.scores[i], hand.join(" "))?;
        }
        Ok(())
    }
}

/// `T/L.R/B` with `A` standing for 10, plus the element glyph if any.
fn card_glyphs(card: &Card) -> String {
    let elem = card.element.map_or(String::new(), |e| format!(" {}", e.glyph()));
    format!(
        "{}/{}.{}/{}{}",
        card.rank_glyph(Dir::Top),
        card.rank_glyph(Dir::Left),
        card.rank_glyph(Dir::Right),
        card.rank_glyph(Dir::Bottom),
        elem
    )
}

fn cell_line(cell: &CellView, line: usize) -> String {
    match (&cell.card, line) {
        (Some(c), 0) => format!("[  {}  ]", c.rank_glyph(Dir::Top)),
        (Some(c), 1) => {
            let owner = cell.owner.map_or('?', |o| char::from(b'1' + (o % 9) as u8));
            format!("[{} {} {}]", c.rank_glyph(Dir::Left), owner, c.rank_glyph(Dir::Right))
        }
        (Some(c), _) => format!("[  {}  ]", c.rank_glyph(Dir::Bottom)),
        (None, 1) => format!("[ {},{} ]", cell.at.x, cell.at.y),
        (None, 2) => format!("[  {}  ]", cell.element.map_or(' ', Element::glyph)),
        (None, _) => "[     ]".to_string(),
    }
}

impl<W: Write> Display for TextDisplay<W> {
    fn show_turn(&mut self, view: &GameView) {
        // Output is best effort; a closed pipe must not stop the game.
        let _ = self.write_view(view);
    }

    fn show_end(&mut self, view: &GameView, outcome: &GameOutcome) {
        let _ = self.write_view(view);
        let _ = match outcome.winner {
            Some(w) => writeln!(self.out, "{} wins!", view.names[w]),
            None => writeln!(self.out, "Draw"),
        };
    }
}
