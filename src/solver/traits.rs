use super::board::GridView;
use crate::{Grid, Position, RevealEngine, Result};
use std::collections::BTreeSet;

/// Positions that a rule has determined to be mines or safe.
///
/// Ordered sets, so applying a deduction is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduction {
    /// Positions that are definitely mines
    pub mines: BTreeSet<Position>,
    /// Positions that are definitely safe
    pub safe: BTreeSet<Position>,
}

impl Deduction {
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safe.is_empty()
    }
}

/// A local inference rule anchored on one revealed cell.
pub trait Rule {
    fn name(&self) -> &str;

    /// Inspects the neighborhood of `cell`. Returns an empty deduction when the
    /// rule's precondition does not hold.
    fn deduce(&self, view: &GridView, cell: Position) -> Deduction;

    /// Deduces and immediately applies the result. Returns whether any cell changed.
    fn apply(&self, grid: &mut Grid, cell: Position, engine: &mut RevealEngine<'_>) -> Result<bool> {
        let deduction = self.deduce(&grid.view(), cell);
        if deduction.is_empty() {
            return Ok(false);
        }
        log::trace!(
            "{} at {cell}: {} mines, {} safe",
            self.name(),
            deduction.mines.len(),
            deduction.safe.len()
        );
        engine.apply(grid, &deduction)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! rule_test_suite {
    ($suite:ident, $rule:ty) => {
        mod $suite {
            use super::*;
            use $crate::solver::test_utils::{validate_rule, TestBoardConfig, TestBoardGenerator};
            use $crate::solver::Rule;
            use $crate::{Dimensions, GameConfig, Grid, NullRenderer, Position, RevealEngine};
            use rand::rngs::StdRng;
            use rand::SeedableRng;

            #[test]
            fn test_silent_on_unopened_board() {
                let rule = <$rule>::default();
                let mut rng = StdRng::seed_from_u64(1);
                let grid = Grid::new(GameConfig::new(5, 5, 5), &mut rng).unwrap();
                let view = grid.view();

                for pos in grid.iter_positions() {
                    assert!(rule.deduce(&view, pos).is_empty());
                }
            }

            #[test]
            fn test_silent_on_solved_board() {
                let rule = <$rule>::default();
                let mut grid = Grid::from_mines(Dimensions::new(3, 3), &[]).unwrap();
                let mut renderer = NullRenderer;
                RevealEngine::new(&mut renderer)
                    .reveal(&mut grid, Position::new(1, 1))
                    .unwrap();
                let view = grid.view();

                for pos in grid.iter_positions() {
                    assert!(rule.deduce(&view, pos).is_empty());
                }
            }

            #[test]
            fn test_deductions_match_ground_truth() {
                let rule = <$rule>::default();
                let config = TestBoardConfig {
                    rows: 12,
                    cols: 12,
                    mine_density: 0.18,
                    revealed_percentage: 0.35,
                    flag_percentage: 0.5,
                };
                let mut generator = TestBoardGenerator::with_seed(config, 2024);

                for (idx, grid) in generator.generate_batch(200).iter().enumerate() {
                    assert!(
                        validate_rule(&rule, grid),
                        "{} failed on generated board {}",
                        rule.name(),
                        idx
                    );
                }
            }

            #[test]
            fn test_rule_name() {
                let rule = <$rule>::default();
                assert!(!rule.name().is_empty(), "Rule name must not be empty");
            }
        }
    };
}
