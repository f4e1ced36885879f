use serde::{Deserialize, Serialize};

use crate::{PieceColor, SpecialKind};

/// Output event consumed by rendering/VFX/audio hosts.
///
/// Events are queued in the order the engine produced them and drained via
/// [`crate::BoardEngine::drain_events`]. They describe what happened; they
/// never influence the resolution algorithm itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A matched piece was removed from the board.
    PieceDestroyed {
        column: usize,
        row: usize,
        color: PieceColor,
    },
    /// A piece was upgraded to a special piece instead of being destroyed.
    PiecePromoted {
        column: usize,
        row: usize,
        special: SpecialKind,
    },
    /// The breakable tile under a destroyed piece absorbed one point of
    /// damage. At zero remaining hit points the tile is gone.
    BreakableDamaged {
        column: usize,
        row: usize,
        remaining_hp: u32,
    },
    /// A refill spawned a fresh piece. Hosts animate it falling in from
    /// [`crate::BoardConfig::spawn_offset`] rows above its cell.
    PieceSpawned {
        column: usize,
        row: usize,
        color: PieceColor,
    },
    /// A requested swap produced no match and was undone.
    SwapReverted,
    /// The resolution pipeline finished and control returned to the move
    /// phase.
    BoardSettled,
}
