use serde::{Deserialize, Serialize};

/// Color of a board piece.
///
/// Colors are compared by value equality; matching never inspects anything
/// else. A board is configured to use the first `palette` entries of
/// [`Self::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    Blue,
    Green,
    Orange,
    Pink,
    Purple,
    Red,
    Yellow,
}

impl PieceColor {
    pub const LEN: usize = 7;
    pub const ALL: [Self; Self::LEN] = [
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Pink,
        Self::Purple,
        Self::Red,
        Self::Yellow,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Orange => 'O',
            Self::Pink => 'P',
            Self::Purple => 'U',
            Self::Red => 'R',
            Self::Yellow => 'Y',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.as_char() == c)
    }
}

/// Upgrade carried by a promoted piece.
///
/// At most one special tag per piece. Row and column bombs clear a full line,
/// adjacent bombs a 3x3 area, color bombs every piece of one color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum SpecialKind {
    RowBomb,
    ColumnBomb,
    AdjacentBomb,
    ColorBomb,
}

/// A single piece on the board.
///
/// The stored `(column, row)` always mirrors the piece's grid cell; the grid
/// keeps it in sync through every relocation. The `matched` flag is set by
/// match detection and consumed by destruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    color: PieceColor,
    column: usize,
    row: usize,
    matched: bool,
    special: Option<SpecialKind>,
}

impl Piece {
    #[must_use]
    pub fn new(color: PieceColor, column: usize, row: usize) -> Self {
        Self {
            color,
            column,
            row,
            matched: false,
            special: None,
        }
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    #[must_use]
    pub fn special(&self) -> Option<SpecialKind> {
        self.special
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }

    pub(crate) fn set_matched(&mut self, matched: bool) {
        self.matched = matched;
    }

    pub(crate) fn set_position(&mut self, column: usize, row: usize) {
        self.column = column;
        self.row = row;
    }

    /// Tags the piece with a special kind.
    ///
    /// Clears any prior matched state first so the piece survives the
    /// destruction cycle that triggered the promotion.
    pub(crate) fn promote(&mut self, special: SpecialKind) {
        self.matched = false;
        self.special = Some(special);
    }
}
