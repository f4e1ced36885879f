use super::{
    cell::{BREAKABLE_HIT_POINTS, BreakableTile, Cell},
    layout::{BoardLayout, TileKind},
    piece::Piece,
};

/// The board matrix: `width` x `height` cells plus the breakable overlay.
///
/// Row 0 is the bottom of the board; columns grow rightward. All mutation goes
/// through the narrow accessors below, which keep each piece's stored
/// coordinates in sync with its cell. Out-of-range access is a programming
/// error and fails fast.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    breakables: Vec<Option<BreakableTile>>,
}

impl Grid {
    /// Builds an unpopulated grid from a validated layout.
    pub(crate) fn new(width: usize, height: usize, layout: &BoardLayout) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            breakables: vec![None; width * height],
        };
        for tile in layout.tiles() {
            let idx = grid.index(tile.x, tile.y);
            match tile.kind {
                TileKind::Blank => grid.cells[idx] = Cell::Blank,
                TileKind::Breakable => {
                    grid.breakables[idx] = Some(BreakableTile::new(BREAKABLE_HIT_POINTS));
                }
                TileKind::Normal => {}
            }
        }
        grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn in_bounds(&self, column: usize, row: usize) -> bool {
        column < self.width && row < self.height
    }

    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            self.in_bounds(column, row),
            "cell ({column}, {row}) out of bounds for {}x{} board",
            self.width,
            self.height,
        );
        row * self.width + column
    }

    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> &Cell {
        &self.cells[self.index(column, row)]
    }

    #[must_use]
    pub fn is_blank(&self, column: usize, row: usize) -> bool {
        self.cell(column, row).is_blank()
    }

    #[must_use]
    pub fn piece_at(&self, column: usize, row: usize) -> Option<&Piece> {
        self.cell(column, row).piece()
    }

    pub(crate) fn piece_at_mut(&mut self, column: usize, row: usize) -> Option<&mut Piece> {
        let idx = self.index(column, row);
        self.cells[idx].piece_mut()
    }

    /// Places a piece on an empty playable cell, updating its stored position.
    pub(crate) fn place_piece(&mut self, column: usize, row: usize, mut piece: Piece) {
        let idx = self.index(column, row);
        assert!(
            self.cells[idx].is_empty(),
            "cell ({column}, {row}) must be empty to place a piece, got {:?}",
            self.cells[idx],
        );
        piece.set_position(column, row);
        self.cells[idx] = Cell::Occupied(piece);
    }

    /// Removes and returns the piece at the cell, leaving it empty.
    ///
    /// Returns `None` for empty and blank cells.
    pub(crate) fn take_piece(&mut self, column: usize, row: usize) -> Option<Piece> {
        let idx = self.index(column, row);
        match self.cells[idx] {
            Cell::Occupied(piece) => {
                self.cells[idx] = Cell::Empty;
                Some(piece)
            }
            Cell::Blank | Cell::Empty => None,
        }
    }

    /// Exchanges the pieces on two occupied cells.
    pub(crate) fn swap_pieces(&mut self, a: (usize, usize), b: (usize, usize)) {
        let piece_a = self
            .take_piece(a.0, a.1)
            .expect("swap requires an occupied cell");
        let piece_b = self
            .take_piece(b.0, b.1)
            .expect("swap requires an occupied cell");
        self.place_piece(a.0, a.1, piece_b);
        self.place_piece(b.0, b.1, piece_a);
    }

    #[must_use]
    pub fn breakable_at(&self, column: usize, row: usize) -> Option<&BreakableTile> {
        self.breakables[self.index(column, row)].as_ref()
    }

    /// Damages the breakable tile under the cell by one point, if present.
    ///
    /// Returns the remaining hit points; the tile is removed at zero.
    pub(crate) fn damage_breakable(&mut self, column: usize, row: usize) -> Option<u32> {
        let idx = self.index(column, row);
        let tile = self.breakables[idx].as_mut()?;
        let remaining = tile.take_damage(1);
        if remaining == 0 {
            self.breakables[idx] = None;
        }
        Some(remaining)
    }

    /// All cell coordinates in placement order: column-outer, row-inner,
    /// bottom to top.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |column| (0..height).map(move |row| (column, row)))
    }
}

#[cfg(test)]
impl Grid {
    /// Builds a grid from ASCII rows, top row first (`.` empty, `#` blank,
    /// color letters per [`crate::PieceColor::as_char`]).
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        use crate::PieceColor;

        let height = rows.len();
        let width = rows[0].len();
        let mut grid = Self::new(width, height, &BoardLayout::default());
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), width, "ragged row in test board");
            let row = height - 1 - i;
            for (column, c) in line.chars().enumerate() {
                match c {
                    '.' => {}
                    '#' => {
                        let idx = grid.index(column, row);
                        grid.cells[idx] = Cell::Blank;
                    }
                    c => {
                        let color = PieceColor::from_char(c)
                            .unwrap_or_else(|| panic!("unknown test color {c:?}"));
                        grid.place_piece(column, row, Piece::new(color, column, row));
                    }
                }
            }
        }
        grid
    }

    pub(crate) fn set_breakable(&mut self, column: usize, row: usize, hit_points: u32) {
        let idx = self.index(column, row);
        self.breakables[idx] = Some(BreakableTile::new(hit_points));
    }
}
