use super::board::GridView;
use super::traits::{Deduction, Rule};
use crate::Position;
use std::collections::BTreeSet;

/// ```text
/// ? ? ?
/// ? 1 ?
/// 1 1 1
/// ```
///
/// When the covered neighbors of a revealed cell all lie inside the covered
/// neighborhood of a single revealed neighbor whose remaining count is no
/// larger, that neighbor's mines are all inside the shared cells and the rest
/// of its covered neighborhood is safe. Here the middle `1` of the bottom row
/// shares its covered cells with the centre `1`, so the top row is safe.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubsetElimination;

impl Rule for SubsetElimination {
    fn name(&self) -> &str {
        "Subset Elimination"
    }

    fn deduce(&self, view: &GridView, cell: Position) -> Deduction {
        let mut deduction = Deduction::default();
        let Some(remaining) = view.effective_number(cell) else {
            return deduction;
        };

        let covered: BTreeSet<Position> = view.covered_neighbors(cell).into_iter().collect();
        if covered.is_empty() {
            return deduction;
        }

        let supersets: Vec<(Position, BTreeSet<Position>)> = view
            .revealed_neighbors(cell)
            .into_iter()
            .map(|other| {
                let cells: BTreeSet<Position> =
                    view.covered_neighbors(other).into_iter().collect();
                (other, cells)
            })
            .filter(|(_, cells)| cells.len() > covered.len() && cells.is_superset(&covered))
            .collect();

        if let [(other, cells)] = supersets.as_slice() {
            if view.effective_number(*other).is_some_and(|n| n <= remaining) {
                deduction.safe.extend(cells.difference(&covered).copied());
            }
        }
        deduction
    }
}
