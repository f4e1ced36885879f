use serde::{Deserialize, Serialize};

/// Counters over the lifetime of one board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    swaps_accepted: u64,
    pieces_destroyed: u64,
    specials_created: u64,
    breakables_destroyed: u64,
    cascades: u64,
    resolutions_completed: u64,
}

impl BoardStats {
    #[must_use]
    pub fn swaps_accepted(&self) -> u64 {
        self.swaps_accepted
    }

    #[must_use]
    pub fn pieces_destroyed(&self) -> u64 {
        self.pieces_destroyed
    }

    #[must_use]
    pub fn specials_created(&self) -> u64 {
        self.specials_created
    }

    #[must_use]
    pub fn breakables_destroyed(&self) -> u64 {
        self.breakables_destroyed
    }

    /// Evaluation passes that found new matches after a refill.
    #[must_use]
    pub fn cascades(&self) -> u64 {
        self.cascades
    }

    /// Full destroy/compact/refill pipelines that ran to completion.
    #[must_use]
    pub fn resolutions_completed(&self) -> u64 {
        self.resolutions_completed
    }

    pub(crate) fn record_swap_accepted(&mut self) {
        self.swaps_accepted += 1;
    }

    pub(crate) fn record_piece_destroyed(&mut self) {
        self.pieces_destroyed += 1;
    }

    pub(crate) fn record_special_created(&mut self) {
        self.specials_created += 1;
    }

    pub(crate) fn record_breakable_destroyed(&mut self) {
        self.breakables_destroyed += 1;
    }

    pub(crate) fn record_cascade(&mut self) {
        self.cascades += 1;
    }

    pub(crate) fn record_resolution_completed(&mut self) {
        self.resolutions_completed += 1;
    }
}
