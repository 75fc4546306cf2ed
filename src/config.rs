use crate::{Dimensions, GameError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl GameConfig {
    pub const BEGINNER: GameConfig = GameConfig::new(9, 9, 10);
    pub const INTERMEDIATE: GameConfig = GameConfig::new(16, 16, 40);
    pub const EXPERT: GameConfig = GameConfig::new(16, 30, 99);

    pub const fn new(rows: usize, cols: usize, mines: usize) -> Self {
        Self { rows, cols, mines }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::BEGINNER),
            "intermediate" => Some(Self::INTERMEDIATE),
            "expert" => Some(Self::EXPERT),
            _ => None,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }

    pub fn safe_cells(&self) -> usize {
        self.dimensions().cell_count().saturating_sub(self.mines)
    }

    /// At least one safe cell is required, so `mines` must stay below the cell count.
    /// Each side must also fit a [`Position`](crate::Position) coordinate.
    pub fn validate(&self) -> Result<()> {
        let max_side = 1..=i32::MAX as usize;
        let fits = max_side.contains(&self.rows)
            && max_side.contains(&self.cols)
            && self
                .rows
                .checked_mul(self.cols)
                .is_some_and(|cells| self.mines < cells);
        if !fits {
            return Err(GameError::InvalidConfiguration {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::EXPERT
    }
}
