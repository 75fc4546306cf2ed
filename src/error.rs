use crate::{CellState, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines on a {rows}x{cols} grid")]
    InvalidConfiguration {
        rows: usize,
        cols: usize,
        mines: usize,
    },
    #[error("Cell {cell} cannot change state from {from:?}")]
    InvalidTransition { cell: Position, from: CellState },
    #[error("Cell {0} is a mine and can only detonate")]
    MineRevealed(Position),
    #[error("No covered cells left to reveal")]
    NoCoveredCells,
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
}

pub type Result<T> = std::result::Result<T, GameError>;
