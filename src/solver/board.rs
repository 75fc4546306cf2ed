use crate::{CellState, Dimensions, Grid, Position};

/// A view of the grid that hides information the rules shouldn't have access to:
/// mine locations, and the numbers of cells that are not yet revealed.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a Grid,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn get(&self, pos: Position) -> Option<SolverCell> {
        self.grid.state(pos).map(|state| match state {
            CellState::Covered => SolverCell::Covered,
            CellState::Flagged => SolverCell::Flagged,
            CellState::Revealed => SolverCell::Revealed(self.grid.adjacent_mine_count(pos)),
            CellState::Detonated => SolverCell::Detonated,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.dimensions().neighbors(pos)
    }

    pub fn covered_neighbors(&self, pos: Position) -> Vec<Position> {
        self.grid.covered_neighbors(pos)
    }

    pub fn revealed_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|p| matches!(self.get(*p), Some(SolverCell::Revealed(_))))
            .collect()
    }

    pub fn effective_number(&self, pos: Position) -> Option<i32> {
        self.grid.effective_number(pos)
    }

    /// Revealed cells that still border at least one covered cell, in row-major order.
    pub fn frontier(&self) -> Vec<Position> {
        self.grid
            .revealed_cells()
            .into_iter()
            .filter(|p| !self.covered_neighbors(*p).is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverCell {
    Covered,
    Flagged,
    /// Raw number of neighboring mines
    Revealed(u8),
    Detonated,
}
