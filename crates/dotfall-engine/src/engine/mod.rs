//! Board resolution logic and phase sequencing.
//!
//! This module provides the high-level logic that orchestrates the core data
//! structures into a playable match-3 board:
//!
//! - [`BoardEngine`] - Owns the grid, match set and phase state machine
//! - [`BoardConfig`] / [`PhaseDelays`] - Board dimensions, palette, pacing
//! - [`PieceSpawner`] / [`BoardSeed`] - Seeded random piece generation
//! - [`MatchSet`] - Matched pieces pending destruction in the current cycle
//! - [`BoardStats`] - Counters over the lifetime of a board
//! - [`BoardEvent`] - Outputs consumed by rendering/VFX/audio hosts
//!
//! # Resolution flow
//!
//! 1. Build a [`BoardEngine`]; the initial fill guarantees (within a bounded
//!    resample budget) that no matches exist before play begins
//! 2. The host calls [`BoardEngine::request_swap`] while the board is in
//!    [`Phase::Move`]
//! 3. An accepted swap starts the destroy / compact / refill cycle, which
//!    repeats until no matches remain, then returns to [`Phase::Move`]
//! 4. The host drives time forward with [`BoardEngine::tick`] and drains
//!    [`BoardEvent`]s between ticks; the engine owns no timer of its own

pub use self::{
    board_engine::*, config::*, deadlock::*, events::*, match_finder::*, spawner::*, stats::*,
};

pub(crate) mod board_engine;
pub(crate) mod config;
pub(crate) mod deadlock;
pub(crate) mod events;
pub(crate) mod generator;
pub(crate) mod match_finder;
pub(crate) mod promotion;
pub(crate) mod spawner;
pub(crate) mod stats;
