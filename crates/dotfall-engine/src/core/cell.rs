use serde::{Deserialize, Serialize};

use super::piece::Piece;

/// Starting durability of a breakable tile.
pub const BREAKABLE_HIT_POINTS: u32 = 2;

/// State of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Permanently unplayable hole in the board shape, fixed at generation
    /// time. Never holds a piece and never changes.
    Blank,
    /// Playable cell with no piece, eligible for refill.
    #[default]
    Empty,
    /// Playable cell holding a piece.
    Occupied(Piece),
}

impl Cell {
    #[must_use]
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            Cell::Blank | Cell::Empty => None,
        }
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            Cell::Blank | Cell::Empty => None,
        }
    }
}

/// Durability overlay beneath a playable cell.
///
/// Lives and dies independently of the pieces above it: each time a matched
/// piece is destroyed on the cell, the tile absorbs exactly one point of
/// damage. The grid removes the tile once its hit points reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakableTile {
    hit_points: u32,
}

impl BreakableTile {
    pub(crate) fn new(hit_points: u32) -> Self {
        Self { hit_points }
    }

    #[must_use]
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Absorbs damage and returns the remaining hit points.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.hit_points = self.hit_points.saturating_sub(amount);
        self.hit_points
    }
}
