use crate::Grid;

use super::match_finder::has_any_match;

/// Does any single swap of adjacent pieces produce a match?
///
/// Pure from the caller's perspective: hypothetical swaps run on a scratch
/// copy of the grid, so no mutation is ever observable. A board where this
/// returns `false` is deadlocked and would need a reshuffle to stay playable.
#[must_use]
pub fn has_any_legal_move(grid: &Grid) -> bool {
    find_legal_move(grid).is_some()
}

/// Returns the first adjacent cell pair whose swap would produce a match.
///
/// Probes each cell's right and up neighbor in placement order; pairs
/// involving empty or blank cells are skipped.
#[must_use]
pub fn find_legal_move(grid: &Grid) -> Option<((usize, usize), (usize, usize))> {
    let mut scratch = grid.clone();
    for (column, row) in grid.positions() {
        if scratch.piece_at(column, row).is_none() {
            continue;
        }
        for neighbor in [(column + 1, row), (column, row + 1)] {
            if !scratch.in_bounds(neighbor.0, neighbor.1)
                || scratch.piece_at(neighbor.0, neighbor.1).is_none()
            {
                continue;
            }
            scratch.swap_pieces((column, row), neighbor);
            let found = has_any_match(&scratch);
            scratch.swap_pieces((column, row), neighbor);
            if found {
                return Some(((column, row), neighbor));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_simple_legal_move() {
        let grid = Grid::from_rows(&["RRGR"]);
        assert!(has_any_legal_move(&grid));
        assert_eq!(find_legal_move(&grid), Some(((2, 0), (3, 0))));
    }

    #[test]
    fn test_latin_square_board_is_deadlocked() {
        // Every row and column holds three distinct colors; no single swap
        // can make any line uniform
        let grid = Grid::from_rows(&[
            "RGB", //
            "GBR", //
            "BRG", //
        ]);
        assert!(!has_any_legal_move(&grid));
    }

    #[test]
    fn test_vertical_move_through_up_neighbor() {
        let grid = Grid::from_rows(&[
            "RG", //
            "GR", //
            "RG", //
            "RG", //
        ]);
        // Swapping (0, 2) with (1, 2) stacks three R in column 0
        assert!(has_any_legal_move(&grid));
    }

    #[test]
    fn test_probe_leaves_grid_untouched() {
        let grid = Grid::from_rows(&[
            "RGB", //
            "GBR", //
            "BRG", //
        ]);
        let before = format!("{grid:?}");
        let _ = has_any_legal_move(&grid);
        assert_eq!(format!("{grid:?}"), before);
    }
}
