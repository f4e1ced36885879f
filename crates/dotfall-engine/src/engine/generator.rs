use crate::{Grid, Piece, PieceColor};

use super::spawner::PieceSpawner;

/// Resample budget per cell during the initial fill.
///
/// After the budget is exhausted the last sampled color is accepted even if it
/// completes a run. That is a deliberate termination-over-perfection tradeoff,
/// not an error path.
pub(crate) const MAX_RESAMPLES: usize = 100;

/// Populates every non-blank cell with a random piece, avoiding pre-existing
/// matches within the resample budget.
///
/// Cells are filled in placement order (column-outer, row-inner), so the
/// look-back probe in [`creates_run_at`] only ever sees cells that are already
/// filled.
pub(crate) fn fill_initial(grid: &mut Grid, spawner: &mut PieceSpawner) {
    for (column, row) in grid.positions() {
        if grid.is_blank(column, row) {
            continue;
        }
        let mut color = spawner.spawn_color();
        let mut resamples = 0;
        while creates_run_at(grid, column, row, color) && resamples < MAX_RESAMPLES {
            color = spawner.spawn_color();
            resamples += 1;
        }
        grid.place_piece(column, row, Piece::new(color, column, row));
    }
}

/// Would placing `color` here complete a run of three with already-filled
/// neighbors?
///
/// Probes only leftward and downward. This look-back-only scan is asymmetric
/// by design: during generation the later cells are not yet placed, so only
/// earlier cells can form a run at placement time.
pub(crate) fn creates_run_at(grid: &Grid, column: usize, row: usize, color: PieceColor) -> bool {
    let same = |c: usize, r: usize| grid.piece_at(c, r).is_some_and(|p| p.color() == color);
    if column >= 2 && same(column - 1, row) && same(column - 2, row) {
        return true;
    }
    row >= 2 && same(column, row - 1) && same(column, row - 2)
}
