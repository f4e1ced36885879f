pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Fatal board construction error.
///
/// Raised before any board state exists; a board is never half-built.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("layout tile ({x}, {y}) is outside the {width}x{height} board")]
    TileOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[display("board must be at least 3x3, got {width}x{height}")]
    BoardTooSmall { width: usize, height: usize },
    #[display("palette must use between 3 and 7 colors, got {palette}")]
    PaletteOutOfRange { palette: usize },
}
