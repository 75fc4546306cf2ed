use super::{DeductionPass, Rule};
use crate::{EventLog, GameConfig, Grid, NullRenderer, RevealEngine};
use rand::prelude::*;

/// Configuration for test board generation
#[derive(Debug, Clone)]
pub struct TestBoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub mine_density: f64,
    pub revealed_percentage: f64,
    /// Share of mines that start out correctly flagged
    pub flag_percentage: f64,
}

impl Default for TestBoardConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            mine_density: 0.15,
            revealed_percentage: 0.3,
            flag_percentage: 0.25,
        }
    }
}

/// Generates partially played boards with known solutions
pub struct TestBoardGenerator {
    config: TestBoardConfig,
    rng: StdRng,
}

impl TestBoardGenerator {
    pub fn with_seed(config: TestBoardConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Opens random safe cells (with flood fill) until the revealed share is
    /// reached, then flags a random share of the mines.
    pub fn generate(&mut self) -> Grid {
        let cells = self.config.rows * self.config.cols;
        let mines = ((cells as f64 * self.config.mine_density) as usize).min(cells - 1);
        let mut grid = Grid::new(
            GameConfig::new(self.config.rows, self.config.cols, mines),
            &mut self.rng,
        )
        .unwrap();

        let target = (cells as f64 * self.config.revealed_percentage) as usize;
        let mut renderer = NullRenderer;
        let mut engine = RevealEngine::new(&mut renderer);

        while grid.revealed_count() < target {
            let safe: Vec<_> = grid
                .covered_cells()
                .into_iter()
                .filter(|p| !grid.is_mine(*p))
                .collect();
            let Some(&pos) = safe.choose(&mut self.rng) else {
                break;
            };
            engine.reveal(&mut grid, pos).unwrap();
        }

        for pos in grid.mine_positions() {
            if self.rng.gen_bool(self.config.flag_percentage) {
                engine.flag(&mut grid, pos).unwrap();
            }
        }

        grid
    }

    /// Generates multiple test cases
    pub fn generate_batch(&mut self, count: usize) -> Vec<Grid> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Checks every deduction the rule makes on the board against the hidden layout.
pub fn validate_rule<R: Rule + ?Sized>(rule: &R, grid: &Grid) -> bool {
    let view = grid.view();

    for cell in view.frontier() {
        let deduction = rule.deduce(&view, cell);

        if !deduction.mines.is_disjoint(&deduction.safe) {
            println!("Rule {} marked a cell both mine and safe at {}", rule.name(), cell);
            return false;
        }

        for pos in deduction.mines.iter().chain(&deduction.safe) {
            if grid.state(*pos) != Some(crate::CellState::Covered) {
                println!("Rule {} deduced non-covered cell {} from {}", rule.name(), pos, cell);
                return false;
            }
        }

        for pos in &deduction.mines {
            if !grid.is_mine(*pos) {
                println!(
                    "Rule {} incorrectly identified safe position {} as mine",
                    rule.name(),
                    pos
                );
                return false;
            }
        }

        for pos in &deduction.safe {
            if grid.is_mine(*pos) {
                println!("Rule {} incorrectly identified mine {} as safe", rule.name(), pos);
                return false;
            }
        }
    }

    true
}

/// Runs the pass to a fixpoint on a copy of the board and checks it neither
/// detonates nor flags a safe cell.
pub fn validate_pass(pass: &DeductionPass, grid: &Grid) -> bool {
    let mut grid = grid.clone();
    let mut log = EventLog::new();
    let mut engine = RevealEngine::new(&mut log);

    if let Err(err) = pass.run_to_fixpoint(&mut grid, &mut engine) {
        println!("Pass failed: {err}");
        return false;
    }

    if let Some(pos) = grid.detonated() {
        println!("Pass detonated mine at {pos}");
        return false;
    }

    let ok = match log.flags().find(|pos| !grid.is_mine(*pos)) {
        Some(pos) => {
            println!("Pass flagged safe cell {pos}");
            false
        }
        None => true,
    };
    ok
}
