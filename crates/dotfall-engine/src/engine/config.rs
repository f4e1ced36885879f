use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PieceColor};

/// Fixed pauses between resolution phases.
///
/// These stand in for animation/visual settle time; the engine does no work
/// while a delay elapses. All four default to the reference pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDelays {
    /// Wait after gravity compaction, before refilling.
    pub compact_settle: Duration,
    /// Wait after refilling, before re-evaluating matches.
    pub refill_settle: Duration,
    /// Pacing between cascade iterations.
    pub cascade_pacing: Duration,
    /// Final wait before control returns to the move phase.
    pub final_settle: Duration,
}

impl Default for PhaseDelays {
    fn default() -> Self {
        Self {
            compact_settle: Duration::from_millis(400),
            refill_settle: Duration::from_millis(500),
            cascade_pacing: Duration::from_millis(300),
            final_settle: Duration::from_millis(500),
        }
    }
}

/// Recognized board options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Vertical offset above the board where refill pieces visually spawn.
    /// Purely a rendering concern, passed through to hosts untouched.
    pub spawn_offset: usize,
    /// Number of piece colors in play (3..=7).
    pub palette: usize,
    /// Per-phase pacing.
    pub delays: PhaseDelays,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            spawn_offset: 10,
            palette: 6,
            delays: PhaseDelays::default(),
        }
    }
}

impl BoardConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !(3..=PieceColor::LEN).contains(&self.palette) {
            return Err(ConfigError::PaletteOutOfRange {
                palette: self.palette,
            });
        }
        Ok(())
    }
}
