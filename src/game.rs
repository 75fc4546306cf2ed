use crate::solver::DeductionPass;
use crate::{Grid, NullRenderer, Position, Renderer, Result, RevealEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameState::Playing => None,
            GameState::Won => Some(Outcome::Won),
            GameState::Lost => Some(Outcome::Lost),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Cells opened without a deduction, in order. The first is the opening move.
    pub guesses: Vec<Position>,
    pub passes: usize,
    pub flags_placed: usize,
    pub cells_revealed: usize,
    pub triggered_mine: Option<Position>,
}

/// Drives one grid to completion: deduction passes until nothing fires, then a guess.
pub struct Game<R: Renderer = NullRenderer> {
    grid: Grid,
    state: GameState,
    rng: StdRng,
    renderer: R,
    pass: DeductionPass,
    guesses: Vec<Position>,
    passes: usize,
}

impl Game<NullRenderer> {
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self::with_renderer(grid, seed, NullRenderer)
    }
}

impl<R: Renderer> Game<R> {
    pub fn with_renderer(grid: Grid, seed: u64, renderer: R) -> Self {
        Self {
            grid,
            state: GameState::Playing,
            rng: StdRng::seed_from_u64(seed),
            renderer,
            pass: DeductionPass::standard(),
            guesses: Vec::new(),
            passes: 0,
        }
    }

    pub fn with_rules(mut self, pass: DeductionPass) -> Self {
        self.pass = pass;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Runs one deduction pass, or guesses if there is nothing to deduce from
    /// (no cell opened yet) or the pass made no progress.
    pub fn step(&mut self) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Ok(self.state);
        }

        let mut engine = RevealEngine::new(&mut self.renderer);

        let stuck = if self.grid.revealed_count() == 0 {
            true
        } else {
            self.passes += 1;
            !self.pass.run(&mut self.grid, &mut engine)?.made_progress()
        };

        if stuck {
            let (cell, _) = engine.reveal_random(&mut self.grid, &mut self.rng)?;
            self.guesses.push(cell);
        }

        self.state = if self.grid.any_detonated() {
            GameState::Lost
        } else if self.grid.is_solved() {
            GameState::Won
        } else {
            GameState::Playing
        };
        Ok(self.state)
    }

    /// Steps until the game is won or lost.
    pub fn run(&mut self) -> Result<RunReport> {
        let outcome = loop {
            if let Some(outcome) = self.step()?.outcome() {
                break outcome;
            }
        };

        log::debug!(
            "game {:?} after {} passes and {} guesses",
            outcome,
            self.passes,
            self.guesses.len()
        );

        Ok(RunReport {
            outcome,
            guesses: self.guesses.clone(),
            passes: self.passes,
            flags_placed: self.grid.flagged_count(),
            cells_revealed: self.grid.revealed_count(),
            triggered_mine: self.grid.detonated(),
        })
    }
}
