use crate::{Grid, SpecialKind};

/// Matched pieces accumulated during one evaluation pass.
///
/// Cells are kept in insertion order; the first entry anchors shape
/// classification. The set is cleared at the start of each detection cycle
/// and again once a full resolution pass completes.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    cells: Vec<(usize, usize)>,
}

impl MatchSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.cells.contains(&(column, row))
    }

    #[must_use]
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    /// Adds a cell unless already present; returns whether it was added.
    pub(crate) fn insert(&mut self, column: usize, row: usize) -> bool {
        if self.contains(column, row) {
            return false;
        }
        self.cells.push((column, row));
        true
    }
}

/// Early-exit structural scan: does any run of three or more exist?
///
/// Independent of the per-piece matched flags, so it can also evaluate
/// hypothetical boards during deadlock detection.
#[must_use]
pub fn has_any_match(grid: &Grid) -> bool {
    for (column, row) in grid.positions() {
        let Some(piece) = grid.piece_at(column, row) else {
            continue;
        };
        let color = piece.color();
        let same = |c: usize, r: usize| grid.piece_at(c, r).is_some_and(|p| p.color() == color);
        if column + 2 < grid.width() && same(column + 1, row) && same(column + 2, row) {
            return true;
        }
        if row + 2 < grid.height() && same(column, row + 1) && same(column, row + 2) {
            return true;
        }
    }
    false
}

/// Scans the whole grid, marks every piece participating in a run of three or
/// more, expands special-piece blasts, and returns the resulting match set.
pub(crate) fn find_matches(grid: &mut Grid) -> MatchSet {
    let mut set = find_base_matches(grid);
    expand_specials(grid, &mut set);
    set
}

/// Run detection only, without blast expansion.
///
/// Every member of a horizontal run of length n >= 3 is covered by the
/// look-back test anchored at the run's rightmost cells, and likewise
/// vertically, so a two-neighbor probe per cell marks whole runs.
pub(crate) fn find_base_matches(grid: &mut Grid) -> MatchSet {
    let mut set = MatchSet::default();
    for (column, row) in grid.positions() {
        let Some(piece) = grid.piece_at(column, row) else {
            continue;
        };
        let color = piece.color();
        let same = |c: usize, r: usize| grid.piece_at(c, r).is_some_and(|p| p.color() == color);
        let horizontal = column >= 2 && same(column - 1, row) && same(column - 2, row);
        let vertical = row >= 2 && same(column, row - 1) && same(column, row - 2);
        if horizontal {
            mark(grid, &mut set, column - 2, row);
            mark(grid, &mut set, column - 1, row);
            mark(grid, &mut set, column, row);
        }
        if vertical {
            mark(grid, &mut set, column, row - 2);
            mark(grid, &mut set, column, row - 1);
            mark(grid, &mut set, column, row);
        }
    }
    set
}

/// Enlarges the match set with the blast area of every matched special piece,
/// chaining until no new cells appear.
///
/// Row and column bombs take their full line, adjacent bombs the 3x3
/// neighborhood. Color bombs do not expand here; their board-wide clear
/// triggers only on swap activation.
pub(crate) fn expand_specials(grid: &mut Grid, set: &mut MatchSet) {
    let mut i = 0;
    // Appended cells are processed too, so chained bombs detonate transitively.
    while i < set.cells().len() {
        let (column, row) = set.cells()[i];
        i += 1;
        let Some(special) = grid.piece_at(column, row).and_then(|p| p.special()) else {
            continue;
        };
        match special {
            SpecialKind::RowBomb => {
                for c in 0..grid.width() {
                    mark(grid, set, c, row);
                }
            }
            SpecialKind::ColumnBomb => {
                for r in 0..grid.height() {
                    mark(grid, set, column, r);
                }
            }
            SpecialKind::AdjacentBomb => {
                for c in column.saturating_sub(1)..=(column + 1).min(grid.width() - 1) {
                    for r in row.saturating_sub(1)..=(row + 1).min(grid.height() - 1) {
                        mark(grid, set, c, r);
                    }
                }
            }
            SpecialKind::ColorBomb => {}
        }
    }
}

/// Marks the piece at the cell (if any) and records it in the set.
pub(crate) fn mark(grid: &mut Grid, set: &mut MatchSet, column: usize, row: usize) {
    let Some(piece) = grid.piece_at_mut(column, row) else {
        return;
    };
    piece.set_matched(true);
    set.insert(column, row);
}

/// Classifies the current match set as a straight line or an irregular
/// cluster.
///
/// Counts how many matched cells share the anchor's row and how many share
/// its column; either count reaching 5 means a straight line-5. Only
/// meaningful for match sets of size 5 or 8.
#[must_use]
pub fn is_line_shape(set: &MatchSet) -> bool {
    let Some(&(anchor_column, anchor_row)) = set.cells().first() else {
        return false;
    };
    let horizontal = set.cells().iter().filter(|&&(_, r)| r == anchor_row).count();
    let vertical = set
        .cells()
        .iter()
        .filter(|&&(c, _)| c == anchor_column)
        .count();
    horizontal == 5 || vertical == 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpecialKind;

    #[test]
    fn test_horizontal_run_marks_all_members() {
        let mut grid = Grid::from_rows(&[
            "GYB", //
            "YBG", //
            "RRR", //
        ]);
        let set = find_matches(&mut grid);
        assert_eq!(set.len(), 3);
        for column in 0..3 {
            assert!(set.contains(column, 0));
            assert!(grid.piece_at(column, 0).unwrap().is_matched());
        }
        assert!(!grid.piece_at(0, 1).unwrap().is_matched());
    }

    #[test]
    fn test_vertical_run_marks_all_members() {
        let mut grid = Grid::from_rows(&[
            "GYB", //
            "GBR", //
            "GRB", //
        ]);
        let set = find_matches(&mut grid);
        assert_eq!(set.len(), 3);
        for row in 0..3 {
            assert!(set.contains(0, row));
        }
    }

    #[test]
    fn test_long_run_is_fully_covered() {
        let mut grid = Grid::from_rows(&[
            "GYBGY", //
            "YBGYB", //
            "RRRRR", //
        ]);
        let set = find_matches(&mut grid);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_has_any_match_early_exit_scan() {
        let matched = Grid::from_rows(&[
            "GYB", //
            "YBG", //
            "RRR", //
        ]);
        let clean = Grid::from_rows(&[
            "RGB", //
            "GBR", //
            "BRG", //
        ]);
        assert!(has_any_match(&matched));
        assert!(!has_any_match(&clean));
    }

    #[test]
    fn test_blank_cells_break_runs() {
        let grid = Grid::from_rows(&[
            "GYB", //
            "YBG", //
            "R#R", //
        ]);
        assert!(!has_any_match(&grid));
    }

    #[test]
    fn test_line_shape_of_five() {
        let mut grid = Grid::from_rows(&[
            "GYBGY", //
            "YBGYB", //
            "RRRRR", //
        ]);
        let set = find_matches(&mut grid);
        assert_eq!(set.len(), 5);
        assert!(is_line_shape(&set));
    }

    #[test]
    fn test_l_cluster_of_five_is_not_line_shape() {
        let mut grid = Grid::from_rows(&[
            "RGB", //
            "RBG", //
            "RRR", //
        ]);
        let set = find_matches(&mut grid);
        assert_eq!(set.len(), 5);
        assert!(!is_line_shape(&set));
    }

    #[test]
    fn test_row_bomb_expands_to_full_row() {
        let mut grid = Grid::from_rows(&[
            "GYBGY", //
            "YBGYB", //
            "RRRGB", //
        ]);
        grid.piece_at_mut(0, 0)
            .unwrap()
            .promote(SpecialKind::RowBomb);
        let set = find_matches(&mut grid);
        // The R run triggers the bomb, which takes the rest of row 0
        assert_eq!(set.len(), 5);
        assert!(set.contains(3, 0));
        assert!(set.contains(4, 0));
    }

    #[test]
    fn test_bomb_chain_detonates_transitively() {
        let mut grid = Grid::from_rows(&[
            "GYBGY", //
            "YBGYG", //
            "RRRGB", //
        ]);
        grid.piece_at_mut(0, 0)
            .unwrap()
            .promote(SpecialKind::RowBomb);
        grid.piece_at_mut(4, 0)
            .unwrap()
            .promote(SpecialKind::ColumnBomb);
        let set = find_matches(&mut grid);
        // Row bomb reaches the column bomb, which takes its whole column
        assert!(set.contains(4, 1));
        assert!(set.contains(4, 2));
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_adjacent_bomb_expands_neighborhood() {
        let mut grid = Grid::from_rows(&[
            "GYBGY", //
            "YBGYB", //
            "RRRGB", //
        ]);
        grid.piece_at_mut(2, 0)
            .unwrap()
            .promote(SpecialKind::AdjacentBomb);
        let set = find_matches(&mut grid);
        // 3-run plus the 3x3 area around (2, 0), clamped to the board edge
        for (c, r) in [(1, 1), (2, 1), (3, 1), (3, 0)] {
            assert!(set.contains(c, r), "missing ({c}, {r})");
        }
    }

    #[test]
    fn test_color_bomb_does_not_expand_passively() {
        let mut grid = Grid::from_rows(&[
            "GYRGY", //
            "YBGYB", //
            "RRRGB", //
        ]);
        grid.piece_at_mut(0, 0)
            .unwrap()
            .promote(SpecialKind::ColorBomb);
        let set = find_matches(&mut grid);
        assert_eq!(set.len(), 3);
        assert!(!set.contains(2, 2));
    }
}
