use crate::solver::GridView;
use crate::{Dimensions, GameConfig, GameError, Position, Result};
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Visibility of a single cell. The only per-cell field that changes during a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Covered,
    Flagged,
    Revealed,
    Detonated,
}

/// Ground truth (mine layout and adjacency counts) plus the visible state of every cell.
///
/// Cells only ever leave `Covered`; flags are permanent.
#[derive(Debug, Clone)]
pub struct Grid {
    dimensions: Dimensions,
    mines: Array2<bool>,
    numbers: Array2<u8>,
    states: Array2<CellState>,
    mine_count: usize,
    revealed_count: usize,
    flagged_count: usize,
    detonated: Option<Position>,
}

impl Grid {
    /// Places `config.mines` mines by shuffling a full-board layout, so every
    /// arrangement is equally likely.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let dimensions = config.dimensions();

        let mut layout = vec![false; dimensions.cell_count()];
        layout.iter_mut().take(config.mines).for_each(|cell| *cell = true);
        layout.shuffle(rng);

        let mines = Array2::from_shape_vec((dimensions.rows, dimensions.cols), layout).map_err(
            |_| GameError::InvalidConfiguration {
                rows: config.rows,
                cols: config.cols,
                mines: config.mines,
            },
        )?;

        let grid = Self::from_mask(dimensions, mines);
        log::debug!(
            "created {}x{} grid with {} mines",
            dimensions.rows,
            dimensions.cols,
            grid.mine_count
        );
        Ok(grid)
    }

    /// Builds a grid with a fixed mine layout. Duplicate positions count once.
    pub fn from_mines(dimensions: Dimensions, mine_positions: &[Position]) -> Result<Self> {
        GameConfig::new(dimensions.rows, dimensions.cols, 0).validate()?;
        let mut mines = Array2::from_elem((dimensions.rows, dimensions.cols), false);
        for &pos in mine_positions {
            let idx = dimensions.index(pos).ok_or(GameError::OutOfBounds(pos))?;
            mines[idx] = true;
        }

        let count = mines.iter().filter(|&&m| m).count();
        GameConfig::new(dimensions.rows, dimensions.cols, count).validate()?;
        Ok(Self::from_mask(dimensions, mines))
    }

    fn from_mask(dimensions: Dimensions, mines: Array2<bool>) -> Self {
        let numbers = Array2::from_shape_fn((dimensions.rows, dimensions.cols), |(r, c)| {
            dimensions
                .neighbors(Position::new(r as i32, c as i32))
                .into_iter()
                .filter(|p| matches!(dimensions.index(*p), Some(idx) if mines[idx]))
                .count() as u8
        });
        let mine_count = mines.iter().filter(|&&m| m).count();

        Self {
            dimensions,
            states: Array2::default((dimensions.rows, dimensions.cols)),
            mines,
            numbers,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
            detonated: None,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// Off-grid positions are never mines.
    pub fn is_mine(&self, pos: Position) -> bool {
        self.dimensions
            .index(pos)
            .is_some_and(|idx| self.mines[idx])
    }

    /// Raw number of mines around `pos`, regardless of its visibility. Zero off-grid.
    pub fn adjacent_mine_count(&self, pos: Position) -> u8 {
        self.dimensions
            .index(pos)
            .map_or(0, |idx| self.numbers[idx])
    }

    pub fn state(&self, pos: Position) -> Option<CellState> {
        self.dimensions.index(pos).map(|idx| self.states[idx])
    }

    pub fn cell(&self, pos: Position) -> Result<CellState> {
        self.state(pos).ok_or(GameError::OutOfBounds(pos))
    }

    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.dimensions.neighbors(pos)
    }

    pub fn covered_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors_in_state(pos, CellState::Covered)
    }

    fn neighbors_in_state(&self, pos: Position, state: CellState) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|p| self.state(*p) == Some(state))
            .collect()
    }

    /// Mines still unaccounted for around a revealed cell: its number minus
    /// flagged neighbors. `None` unless the cell is revealed.
    pub fn effective_number(&self, pos: Position) -> Option<i32> {
        if self.state(pos) != Some(CellState::Revealed) {
            return None;
        }
        let flagged = self.neighbors_in_state(pos, CellState::Flagged).len() as i32;
        Some(self.adjacent_mine_count(pos) as i32 - flagged)
    }

    pub fn mark_flagged(&mut self, pos: Position) -> Result<()> {
        self.transition(pos, CellState::Flagged)?;
        self.flagged_count += 1;
        Ok(())
    }

    /// Mines never become `Revealed`; use [`Grid::mark_detonated`] for them.
    pub fn mark_revealed(&mut self, pos: Position) -> Result<()> {
        if self.is_mine(pos) {
            return Err(GameError::MineRevealed(pos));
        }
        self.transition(pos, CellState::Revealed)?;
        self.revealed_count += 1;
        Ok(())
    }

    pub fn mark_detonated(&mut self, pos: Position) -> Result<()> {
        self.transition(pos, CellState::Detonated)?;
        self.detonated = Some(pos);
        Ok(())
    }

    fn transition(&mut self, pos: Position, to: CellState) -> Result<()> {
        let idx = self
            .dimensions
            .index(pos)
            .ok_or(GameError::OutOfBounds(pos))?;
        let from = self.states[idx];
        if from != CellState::Covered {
            return Err(GameError::InvalidTransition { cell: pos, from });
        }
        self.states[idx] = to;
        Ok(())
    }

    pub fn is_solved(&self) -> bool {
        self.detonated.is_none()
            && self.revealed_count == self.dimensions.cell_count() - self.mine_count
    }

    pub fn any_detonated(&self) -> bool {
        self.detonated.is_some()
    }

    pub fn detonated(&self) -> Option<Position> {
        self.detonated
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        self.dimensions.positions()
    }

    pub fn covered_cells(&self) -> Vec<Position> {
        self.cells_in_state(CellState::Covered)
    }

    pub fn revealed_cells(&self) -> Vec<Position> {
        self.cells_in_state(CellState::Revealed)
    }

    fn cells_in_state(&self, state: CellState) -> Vec<Position> {
        self.iter_positions()
            .filter(|p| self.state(*p) == Some(state))
            .collect()
    }

    pub fn mine_positions(&self) -> Vec<Position> {
        self.iter_positions().filter(|p| self.is_mine(*p)).collect()
    }

    /// The rule-facing view of this grid; it exposes numbers of revealed cells only.
    pub fn view(&self) -> GridView<'_> {
        GridView::new(self)
    }

    /// One line per row: `#` covered, `F` flagged, `.` empty, digits for numbers,
    /// `*` the detonated mine and `x` every other mine once the game is lost.
    pub fn render_text(&self) -> String {
        let lost = self.any_detonated();
        let mut out = String::with_capacity(self.dimensions.cell_count() + self.dimensions.rows);
        for row in 0..self.dimensions.rows {
            for col in 0..self.dimensions.cols {
                let pos = Position::new(row as i32, col as i32);
                let symbol = match self.state(pos) {
                    Some(CellState::Detonated) => '*',
                    Some(CellState::Flagged) => 'F',
                    Some(CellState::Covered) if lost && self.is_mine(pos) => 'x',
                    Some(CellState::Covered) | None => '#',
                    Some(CellState::Revealed) => match self.adjacent_mine_count(pos) {
                        0 => '.',
                        n => char::from(b'0' + n),
                    },
                };
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_mine_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for mines in [0, 1, 40, 479] {
            let grid = Grid::new(GameConfig::new(16, 30, mines), &mut rng).unwrap();
            assert_eq!(grid.mine_count(), mines);
            assert_eq!(grid.mine_positions().len(), mines);
        }
    }

    #[test]
    fn test_rejects_full_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = Grid::new(GameConfig::new(3, 3, 9), &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidConfiguration {
                rows: 3,
                cols: 3,
                mines: 9
            }
        );
    }

    #[test]
    fn test_adjacent_counts_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(99);
        let grid = Grid::new(GameConfig::EXPERT, &mut rng).unwrap();
        for pos in grid.iter_positions() {
            let mut expected = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if (dr, dc) != (0, 0) && grid.is_mine(pos.offset(dr, dc)) {
                        expected += 1;
                    }
                }
            }
            assert_eq!(grid.adjacent_mine_count(pos), expected, "at {pos}");
        }
    }

    #[test]
    fn test_from_mines() {
        let dims = Dimensions::new(3, 3);
        let grid = Grid::from_mines(dims, &[Position::new(0, 0), Position::new(0, 0)]).unwrap();
        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid.adjacent_mine_count(Position::new(1, 1)), 1);
        assert_eq!(grid.adjacent_mine_count(Position::new(2, 2)), 0);

        assert_eq!(
            Grid::from_mines(dims, &[Position::new(3, 0)]).unwrap_err(),
            GameError::OutOfBounds(Position::new(3, 0))
        );
    }

    #[test]
    fn test_transitions_are_one_way() {
        let mut grid = Grid::from_mines(Dimensions::new(2, 2), &[Position::new(0, 0)]).unwrap();
        let pos = Position::new(1, 1);
        grid.mark_revealed(pos).unwrap();
        assert_eq!(
            grid.mark_flagged(pos),
            Err(GameError::InvalidTransition {
                cell: pos,
                from: CellState::Revealed
            })
        );

        grid.mark_flagged(Position::new(0, 0)).unwrap();
        assert_eq!(
            grid.mark_revealed(Position::new(0, 0)),
            Err(GameError::MineRevealed(Position::new(0, 0)))
        );
        assert_eq!(grid.flagged_count(), 1);
        assert_eq!(grid.revealed_count(), 1);
        assert_eq!(
            grid.mark_revealed(Position::new(5, 5)),
            Err(GameError::OutOfBounds(Position::new(5, 5)))
        );
    }

    #[test]
    fn test_effective_number_subtracts_flags() {
        let mines = [Position::new(0, 0), Position::new(0, 1)];
        let mut grid = Grid::from_mines(Dimensions::new(3, 3), &mines).unwrap();
        let center = Position::new(1, 1);

        assert_eq!(grid.effective_number(center), None);
        grid.mark_revealed(center).unwrap();
        assert_eq!(grid.effective_number(center), Some(2));
        grid.mark_flagged(Position::new(0, 0)).unwrap();
        assert_eq!(grid.effective_number(center), Some(1));
        assert_eq!(grid.covered_neighbors(center).len(), 6);
    }

    #[test]
    fn test_solved_and_detonated() {
        let mut grid = Grid::from_mines(Dimensions::new(1, 2), &[Position::new(0, 0)]).unwrap();
        assert!(!grid.is_solved());
        grid.mark_revealed(Position::new(0, 1)).unwrap();
        assert!(grid.is_solved());

        let mut grid = Grid::from_mines(Dimensions::new(1, 2), &[Position::new(0, 0)]).unwrap();
        grid.mark_detonated(Position::new(0, 0)).unwrap();
        grid.mark_revealed(Position::new(0, 1)).unwrap();
        assert!(grid.any_detonated());
        assert!(!grid.is_solved());
        assert_eq!(grid.detonated(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_revealing_a_mine_never_solves() {
        let mine = Position::new(0, 0);
        let mut grid = Grid::from_mines(Dimensions::new(1, 2), &[mine]).unwrap();
        assert_eq!(grid.mark_revealed(mine), Err(GameError::MineRevealed(mine)));
        assert_eq!(grid.state(mine), Some(CellState::Covered));
        assert_eq!(grid.revealed_count(), 0);
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_from_mines_rejects_oversized_dimensions() {
        let dims = Dimensions::new(usize::MAX / 2 + 1, 2);
        assert!(matches!(
            Grid::from_mines(dims, &[]),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_render_text() {
        let mut grid = Grid::from_mines(Dimensions::new(2, 3), &[Position::new(0, 0)]).unwrap();
        grid.mark_revealed(Position::new(1, 2)).unwrap();
        grid.mark_revealed(Position::new(1, 1)).unwrap();
        grid.mark_flagged(Position::new(0, 0)).unwrap();
        assert_eq!(grid.render_text(), "F##\n#1.\n");
    }
}
