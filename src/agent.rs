use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::error::{GameError, Result};
use crate::state::{Action, GameState};
use crate::types::Coord;

/// Anything that can choose a move for the player whose turn it is.
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose an action for `state.current_index()`.
    fn get_action(&mut self, state: &GameState) -> Result<Action>;

    /// Interactive agents are asked again after an illegal action; others abort the game.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Plays its first card into the first free cell.
#[derive(Debug, Default, Clone)]
pub struct FirstAvailableAgent;

impl Agent for FirstAvailableAgent {
    fn name(&self) -> &str {
        "first-available"
    }

    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        state
            .legal_actions()
            .into_iter()
            .next()
            .ok_or(GameError::NoLegalAction {
                player: state.current_index(),
            })
    }
}

/// Uniformly random legal action.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: Pcg64,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        state
            .legal_actions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalAction {
                player: state.current_index(),
            })
    }
}

/// Replays a fixed list of actions in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedAgent {
    script: VecDeque<Action>,
    interactive: bool,
}

impl ScriptedAgent {
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: script.into_iter().collect(),
            interactive: false,
        }
    }

    /// Behave like a human at the keyboard: illegal actions are re-requested.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        self.script.pop_front().ok_or(GameError::NoLegalAction {
            player: state.current_index(),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Reads `card x y` lines (card numbers start at 1) and asks again until the
/// action is legal for the current player.
#[derive(Debug)]
pub struct HumanAgent<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_action(line: &str) -> Option<Action> {
    let mut parts = line.split_whitespace().map(str::parse::<usize>);
    let card = parts.next()?.ok()?;
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    if parts.next().is_some() || card == 0 {
        return None;
    }
    Some(Action::new(card - 1, Coord::new(x, y)))
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        let player = state.current_index();
        loop {
            write!(self.output, "{}'s turn: ", state.current_player().name())?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
            }
            let Some(action) = parse_action(&line) else {
                writeln!(self.output, "expected: <card> <x> <y>")?;
                continue;
            };
            match state.validate(player, action) {
                Ok(()) => return Ok(action),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
