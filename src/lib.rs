pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod position;
pub mod render;
pub mod reveal;
pub mod solver;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{Game, GameState, Outcome, RunReport};
pub use grid::{CellState, Grid};
pub use position::{Dimensions, Position};
pub use render::{EventLog, NullRenderer, RenderEvent, Renderer};
pub use reveal::{RevealEngine, RevealOutcome};
pub use solver::{DeductionPass, Rule};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a `rows` x `cols` grid with `mine_count` mines placed from `seed`.
pub fn new_game(rows: usize, cols: usize, mine_count: usize, seed: u64) -> Result<Grid> {
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::new(GameConfig::new(rows, cols, mine_count), &mut rng)
}

/// Plays `grid` to the end, drawing guesses from `seed`.
///
/// An `Err` means the engine reached an impossible state and should be treated as a bug.
pub fn run_solver(grid: Grid, seed: u64) -> Result<Outcome> {
    Game::new(grid, seed).run().map(|report| report.outcome)
}

/// Like [`run_solver`], reporting every state change to `renderer`.
pub fn run_solver_with<R: Renderer>(grid: Grid, seed: u64, renderer: R) -> Result<RunReport> {
    Game::with_renderer(grid, seed, renderer).run()
}
