use super::board::GridView;
use super::traits::{Deduction, Rule};
use crate::Position;
use itertools::Itertools;

/// The 1-2-1 edge pattern.
///
/// ```text
/// ? ? ?
/// 1 2 1
/// ```
///
/// A 2 whose only covered neighbors are three cells along one side of it. A
/// revealed 1 beside the 2 on that axis covers the near end and the middle of
/// the line but not the far end, so it can hold at most one of the 2's mines:
/// the far end is a mine and the 1's other covered neighbors are safe. With a 1
/// on both sides both ends are mines and the middle is safe.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwoInALine;

impl Rule for TwoInALine {
    fn name(&self) -> &str {
        "Two In A Line"
    }

    fn deduce(&self, view: &GridView, cell: Position) -> Deduction {
        let mut deduction = Deduction::default();
        if view.effective_number(cell) != Some(2) {
            return deduction;
        }

        let mut line = view.covered_neighbors(cell);
        if line.len() != 3 {
            return deduction;
        }

        // Three colinear neighbors can only be a full row above/below or a
        // full column left/right of the cell.
        let (dr, dc) = if line.iter().map(|p| p.row).all_equal() {
            line.sort_by_key(|p| p.col);
            (0, 1)
        } else if line.iter().map(|p| p.col).all_equal() {
            line.sort_by_key(|p| p.row);
            (1, 0)
        } else {
            return deduction;
        };
        let (low_end, middle, high_end) = (line[0], line[1], line[2]);

        for (step, far_end) in [(-1, high_end), (1, low_end)] {
            let flank = cell.offset(step * dr, step * dc);
            if view.effective_number(flank) != Some(1) {
                continue;
            }
            deduction.mines.insert(far_end);
            deduction.safe.extend(
                view.covered_neighbors(flank)
                    .into_iter()
                    .filter(|p| !line.contains(p)),
            );
        }

        if deduction.mines.len() == 2 {
            deduction.safe.insert(middle);
        }
        deduction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dimensions, Grid};

    fn open(grid: &mut Grid, revealed: &[Position]) {
        for &pos in revealed {
            grid.mark_revealed(pos).unwrap();
        }
    }

    #[test]
    fn test_one_two_one_on_wall() {
        // x . x
        // 1 2 1
        // . . .
        let mines = [Position::new(0, 0), Position::new(0, 2)];
        let mut grid = Grid::from_mines(Dimensions::new(3, 3), &mines).unwrap();
        let revealed: Vec<Position> = (1..3)
            .flat_map(|r| (0..3).map(move |c| Position::new(r, c)))
            .collect();
        open(&mut grid, &revealed);

        let deduction = TwoInALine.deduce(&grid.view(), Position::new(1, 1));
        assert_eq!(deduction.mines.into_iter().collect::<Vec<_>>(), mines.to_vec());
        assert_eq!(
            deduction.safe.into_iter().collect::<Vec<_>>(),
            vec![Position::new(0, 1)]
        );
    }

    #[test]
    fn test_single_flank_clears_its_outer_cells() {
        // # x # x x
        // # 1 2 2 #
        // # . . . #
        let mines = [Position::new(0, 1), Position::new(0, 3), Position::new(0, 4)];
        let mut grid = Grid::from_mines(Dimensions::new(3, 5), &mines).unwrap();
        open(
            &mut grid,
            &[
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(2, 3),
            ],
        );
        assert_eq!(grid.effective_number(Position::new(1, 1)), Some(1));
        assert_eq!(grid.effective_number(Position::new(1, 3)), Some(2));

        let deduction = TwoInALine.deduce(&grid.view(), Position::new(1, 2));
        assert_eq!(
            deduction.mines.into_iter().collect::<Vec<_>>(),
            vec![Position::new(0, 3)]
        );
        assert_eq!(
            deduction.safe.into_iter().collect::<Vec<_>>(),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_vertical_line() {
        // . 1 .
        // x 2 .
        // x . .
        let mines = [Position::new(1, 0), Position::new(2, 0)];
        let mut grid = Grid::from_mines(Dimensions::new(3, 3), &mines).unwrap();
        open(
            &mut grid,
            &[
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(2, 2),
            ],
        );
        assert_eq!(grid.effective_number(Position::new(2, 1)), Some(2));

        let deduction = TwoInALine.deduce(&grid.view(), Position::new(1, 1));
        assert_eq!(
            deduction.mines.into_iter().collect::<Vec<_>>(),
            vec![Position::new(2, 0)]
        );
        assert!(deduction.safe.is_empty());
    }

    #[test]
    fn test_ignores_non_colinear_cells() {
        // x # .
        // x 2 .
        // . . .
        let mines = [Position::new(0, 0), Position::new(1, 0)];
        let mut grid = Grid::from_mines(Dimensions::new(3, 3), &mines).unwrap();
        open(
            &mut grid,
            &[
                Position::new(0, 2),
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ],
        );
        assert_eq!(grid.covered_neighbors(Position::new(1, 1)).len(), 3);
        assert!(TwoInALine.deduce(&grid.view(), Position::new(1, 1)).is_empty());
    }

    crate::rule_test_suite!(two_in_a_line_suite, TwoInALine);
}
