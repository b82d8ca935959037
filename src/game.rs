use tracing::{info, warn};

use crate::agent::Agent;
use crate::cards::CardsDb;
use crate::config::GameConfig;
use crate::display::{Display, GameOutcome, GameView, NullDisplay};
use crate::error::{GameError, Result};
use crate::rng::{fresh_seed, rng_for_game, GameRng};
use crate::state::GameState;

/// Drives one game: deal once, take turns until the grid is full, replay on a
/// sudden-death tie, then name the winner.
pub struct Game<'a> {
    state: GameState,
    agents: Vec<Box<dyn Agent + 'a>>,
    display: Box<dyn Display + 'a>,
    rng: GameRng,
    max_rounds: Option<u32>,
}

impl<'a> Game<'a> {
    /// Deal from `catalog` and set up the board as `config` describes.
    pub fn new(config: &GameConfig, catalog: &CardsDb, agents: Vec<Box<dyn Agent + 'a>>) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(fresh_seed);
        let mut rng = rng_for_game(seed, 0);
        let hands = catalog.deal_cards(config.players, config.hand_size, &mut rng)?;
        let state = GameState::new(config.rules, config.width, config.height, hands, &mut rng)?;
        info!(seed, rules = %config.rules, first = state.current_index(), "game dealt");
        Self::from_state(state, agents, rng, config.max_rounds)
    }

    /// Take over an already dealt state.
    pub fn from_state(
        state: GameState,
        agents: Vec<Box<dyn Agent + 'a>>,
        rng: GameRng,
        max_rounds: Option<u32>,
    ) -> Result<Self> {
        if agents.len() != state.players().len() {
            return Err(GameError::Config(format!(
                "{} agents for {} players",
                agents.len(),
                state.players().len()
            )));
        }
        Ok(Self {
            state,
            agents,
            display: Box::new(NullDisplay),
            rng,
            max_rounds,
        })
    }

    pub fn with_display(mut self, display: Box<dyn Display + 'a>) -> Self {
        self.display = display;
        self
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ask the current agent for an action until one is legal, apply it and pass the turn.
    pub fn play_turn(&mut self) -> Result<()> {
        self.display.show_turn(&GameView::of(&self.state));
        let player = self.state.current_index();
        let agent = self
            .agents
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        loop {
            let action = agent.get_action(&self.state)?;
            match self.state.apply_action(action) {
                Ok(report) => {
                    info!(
                        player,
                        agent = agent.name(),
                        card_index = action.card_index,
                        at = %action.at,
                        flips = report.flips.len(),
                        "turn played"
                    );
                    return Ok(());
                }
                Err(e) if e.is_illegal_move() && agent.is_interactive() => {
                    warn!(player, error = %e, "illegal action, asking again");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Play to the end and report the result.
    pub fn run(&mut self) -> Result<GameOutcome> {
        let mut rounds: u32 = 1;
        loop {
            while !self.state.is_terminal() {
                self.play_turn()?;
            }
            let capped = self.max_rounds.is_some_and(|m| rounds >= m);
            if self.state.rules().sudden_death && self.state.scores_tied() && !capped {
                info!(round = rounds, "round tied, sudden death");
                self.state.reset_round(&mut self.rng);
                rounds += 1;
                continue;
            }
            break;
        }

        let outcome = GameOutcome {
            winner: self.state.winner(),
            scores: self.state.players().iter().map(|p| p.score()).collect(),
            rounds,
        };
        info!(winner = ?outcome.winner, scores = ?outcome.scores, rounds, "game over");
        self.display.show_end(&GameView::of(&self.state), &outcome);
        Ok(outcome)
    }
}
