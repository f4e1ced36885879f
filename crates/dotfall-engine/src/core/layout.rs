use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Role of a coordinate in the initial board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Breakable,
    Blank,
    Normal,
}

/// One `(x, y, kind)` entry of the board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub x: usize,
    pub y: usize,
    pub kind: TileKind,
}

impl TileSpec {
    #[must_use]
    pub fn blank(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            kind: TileKind::Blank,
        }
    }

    #[must_use]
    pub fn breakable(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            kind: TileKind::Breakable,
        }
    }
}

/// Declarative board shape, consumed once at board construction.
///
/// Coordinates not listed are normal playable cells. An empty layout is a
/// fully playable rectangular board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    tiles: Vec<TileSpec>,
}

impl BoardLayout {
    #[must_use]
    pub fn new(tiles: Vec<TileSpec>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TileSpec> {
        self.tiles.iter()
    }

    pub(crate) fn validate(&self, width: usize, height: usize) -> Result<(), ConfigError> {
        for tile in &self.tiles {
            if tile.x >= width || tile.y >= height {
                return Err(ConfigError::TileOutOfBounds {
                    x: tile.x,
                    y: tile.y,
                    width,
                    height,
                });
            }
        }
        Ok(())
    }
}
