mod board;
mod counting;
mod line;
mod subset;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
mod traits;

pub use board::{GridView, SolverCell};
pub use counting::{ClearReveal, SaturateFlag};
pub use line::TwoInALine;
pub use subset::SubsetElimination;
pub use traits::{Deduction, Rule};

use crate::{Grid, RevealEngine, Result};

/// Applies an ordered list of rules to every frontier cell.
pub struct DeductionPass {
    rules: Vec<Box<dyn Rule>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub cells_examined: usize,
    pub firings: usize,
}

impl PassReport {
    pub fn made_progress(&self) -> bool {
        self.firings > 0
    }
}

impl DeductionPass {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The four local rules, cheapest first.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(SaturateFlag),
            Box::new(ClearReveal),
            Box::new(TwoInALine),
            Box::new(SubsetElimination),
        ])
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// One sweep over the cells that were on the frontier when the pass began.
    /// Each rule sees the effects of every rule applied before it.
    pub fn run(&self, grid: &mut Grid, engine: &mut RevealEngine<'_>) -> Result<PassReport> {
        let mut report = PassReport::default();

        for cell in grid.view().frontier() {
            report.cells_examined += 1;
            for rule in &self.rules {
                if rule.apply(grid, cell, engine)? {
                    report.firings += 1;
                }
                if grid.any_detonated() {
                    log::warn!("{} detonated a mine from {cell}", rule.name());
                    return Ok(report);
                }
            }
        }

        log::trace!(
            "pass examined {} cells, {} rule firings",
            report.cells_examined,
            report.firings
        );
        Ok(report)
    }

    /// Repeats passes until one makes no progress. Returns the number of passes run.
    pub fn run_to_fixpoint(&self, grid: &mut Grid, engine: &mut RevealEngine<'_>) -> Result<usize> {
        let mut passes = 0;
        loop {
            passes += 1;
            let report = self.run(grid, engine)?;
            if !report.made_progress() || grid.any_detonated() {
                return Ok(passes);
            }
        }
    }
}

impl Default for DeductionPass {
    fn default() -> Self {
        Self::standard()
    }
}
