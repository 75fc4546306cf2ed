use super::board::GridView;
use super::traits::{Deduction, Rule};
use crate::Position;

/// If a revealed cell's remaining mine count equals its number of covered
/// neighbors, every one of them is a mine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaturateFlag;

impl Rule for SaturateFlag {
    fn name(&self) -> &str {
        "Saturate Flag"
    }

    fn deduce(&self, view: &GridView, cell: Position) -> Deduction {
        let mut deduction = Deduction::default();
        let Some(remaining) = view.effective_number(cell) else {
            return deduction;
        };

        let covered = view.covered_neighbors(cell);
        if remaining > 0 && remaining as usize == covered.len() {
            deduction.mines.extend(covered);
        }
        deduction
    }
}

/// If a revealed cell has no mines left to account for, all its covered neighbors are safe.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearReveal;

impl Rule for ClearReveal {
    fn name(&self) -> &str {
        "Clear Reveal"
    }

    fn deduce(&self, view: &GridView, cell: Position) -> Deduction {
        let mut deduction = Deduction::default();
        if view.effective_number(cell) == Some(0) {
            deduction.safe.extend(view.covered_neighbors(cell));
        }
        deduction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellState, Dimensions, Grid, NullRenderer, RevealEngine};

    fn strip() -> Grid {
        // x 1 .
        Grid::from_mines(Dimensions::new(1, 3), &[Position::new(0, 0)]).unwrap()
    }

    #[test]
    fn test_saturate_flag_on_strip() {
        let mut grid = strip();
        let mut renderer = NullRenderer;
        let mut engine = RevealEngine::new(&mut renderer);

        engine.reveal(&mut grid, Position::new(0, 2)).unwrap();
        assert_eq!(grid.effective_number(Position::new(0, 2)), Some(0));
        assert_eq!(grid.effective_number(Position::new(0, 1)), Some(1));
        assert_eq!(grid.covered_neighbors(Position::new(0, 1)), vec![Position::new(0, 0)]);

        let progress = SaturateFlag
            .apply(&mut grid, Position::new(0, 1), &mut engine)
            .unwrap();
        assert!(progress);
        assert_eq!(grid.state(Position::new(0, 0)), Some(CellState::Flagged));
        assert_eq!(grid.effective_number(Position::new(0, 1)), Some(0));
    }

    #[test]
    fn test_saturate_flag_needs_exact_count() {
        let mines = [Position::new(0, 0)];
        let mut grid = Grid::from_mines(Dimensions::new(2, 2), &mines).unwrap();
        grid.mark_revealed(Position::new(1, 1)).unwrap();

        let deduction = SaturateFlag.deduce(&grid.view(), Position::new(1, 1));
        assert!(deduction.is_empty());
    }

    #[test]
    fn test_saturate_flag_uses_true_corner_neighborhood() {
        // Corner cell with three neighbors, all mines.
        let mines = [Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)];
        let mut grid = Grid::from_mines(Dimensions::new(3, 3), &mines).unwrap();
        grid.mark_revealed(Position::new(0, 0)).unwrap();

        let deduction = SaturateFlag.deduce(&grid.view(), Position::new(0, 0));
        assert_eq!(deduction.mines.into_iter().collect::<Vec<_>>(), mines.to_vec());
    }

    #[test]
    fn test_clear_reveal_after_flag() {
        let mines = [Position::new(0, 0)];
        let mut grid = Grid::from_mines(Dimensions::new(2, 3), &mines).unwrap();
        grid.mark_revealed(Position::new(1, 1)).unwrap();
        grid.mark_flagged(Position::new(0, 0)).unwrap();

        let deduction = ClearReveal.deduce(&grid.view(), Position::new(1, 1));
        assert!(deduction.mines.is_empty());
        assert_eq!(deduction.safe.len(), 4);
        assert!(!deduction.safe.contains(&Position::new(0, 0)));
    }

    #[test]
    fn test_clear_reveal_silent_with_mines_left() {
        let mines = [Position::new(0, 0)];
        let mut grid = Grid::from_mines(Dimensions::new(2, 3), &mines).unwrap();
        grid.mark_revealed(Position::new(1, 1)).unwrap();

        assert!(ClearReveal.deduce(&grid.view(), Position::new(1, 1)).is_empty());
    }

    crate::rule_test_suite!(saturate_flag_suite, SaturateFlag);
    crate::rule_test_suite!(clear_reveal_suite, ClearReveal);
}
