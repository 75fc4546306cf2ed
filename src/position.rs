use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid coordinate. Signed so that off-grid neighbors can be represented
/// before they are clipped against the grid's [`Dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// All eight surrounding coordinates, unclipped.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    None
                } else {
                    Some(Position::new(self.row + dr, self.col + dc))
                }
            })
        })
    }

    pub fn offset(&self, dr: i32, dc: i32) -> Position {
        Position::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// In-bounds neighbors of `pos`, in row-major order. A corner has 3,
    /// an edge cell 5 and an interior cell 8.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        pos.neighbors().filter(|p| self.contains(*p)).collect()
    }

    /// Every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Position::new(r as i32, c as i32)))
    }

    pub(crate) fn index(&self, pos: Position) -> Option<(usize, usize)> {
        self.contains(pos)
            .then_some((pos.row as usize, pos.col as usize))
    }
}
