use crate::solver::Deduction;
use crate::{CellState, GameError, Grid, Position, Renderer, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was not covered.
    NoChange,
    /// Number of cells opened, including the flood fill.
    Revealed(usize),
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Performs every visible mutation of a [`Grid`] and reports it to the renderer.
pub struct RevealEngine<'r> {
    renderer: &'r mut dyn Renderer,
}

impl<'r> RevealEngine<'r> {
    pub fn new(renderer: &'r mut dyn Renderer) -> Self {
        Self { renderer }
    }

    /// Opens `cell`. A mine detonates and ends the game; a zero opens its whole
    /// connected zero region plus that region's border.
    pub fn reveal(&mut self, grid: &mut Grid, cell: Position) -> Result<RevealOutcome> {
        if grid.cell(cell)? != CellState::Covered {
            return Ok(RevealOutcome::NoChange);
        }

        if grid.is_mine(cell) {
            grid.mark_detonated(cell)?;
            let mines = grid.mine_positions();
            log::debug!("mine detonated at {cell}");
            self.renderer.on_detonate(&mines, cell);
            return Ok(RevealOutcome::HitMine);
        }

        // Neighbors of a zero are never mines, so the fill cannot detonate.
        let mut queue = VecDeque::from([cell]);
        let mut visited = HashSet::from([cell]);
        let mut revealed = 0;

        while let Some(pos) = queue.pop_front() {
            if grid.state(pos) != Some(CellState::Covered) {
                continue;
            }
            grid.mark_revealed(pos)?;
            revealed += 1;

            let number = grid.adjacent_mine_count(pos);
            self.renderer.on_reveal(pos, number);

            if number == 0 {
                for next in grid.covered_neighbors(pos) {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        if revealed > 1 {
            log::trace!("flood fill from {cell} opened {revealed} cells");
        }
        Ok(RevealOutcome::Revealed(revealed))
    }

    pub fn flag(&mut self, grid: &mut Grid, cell: Position) -> Result<()> {
        grid.mark_flagged(cell)?;
        self.renderer.on_flag(cell);
        Ok(())
    }

    /// Opens a uniformly chosen covered cell; the fallback when nothing can be deduced.
    pub fn reveal_random<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<(Position, RevealOutcome)> {
        let covered = grid.covered_cells();
        let &cell = covered.choose(rng).ok_or(GameError::NoCoveredCells)?;
        log::debug!("guessing {cell} among {} covered cells", covered.len());
        let outcome = self.reveal(grid, cell)?;
        Ok((cell, outcome))
    }

    /// Flags the deduced mines, then opens the deduced safe cells. Safe cells
    /// already opened by an earlier flood fill are skipped.
    pub fn apply(&mut self, grid: &mut Grid, deduction: &Deduction) -> Result<bool> {
        let mut progress = false;

        for &cell in &deduction.mines {
            self.flag(grid, cell)?;
            progress = true;
        }

        for &cell in &deduction.safe {
            let outcome = self.reveal(grid, cell)?;
            progress |= outcome.has_update();
            if outcome == RevealOutcome::HitMine {
                break;
            }
        }

        Ok(progress)
    }
}
