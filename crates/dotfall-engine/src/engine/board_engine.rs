use std::{collections::VecDeque, time::Duration};

use crate::{BoardLayout, ConfigError, Grid, Piece, SpecialKind};

use super::{
    config::BoardConfig,
    deadlock,
    events::BoardEvent,
    generator,
    match_finder::{self, MatchSet},
    promotion::{self, SwapAxis, SwapContext},
    spawner::{BoardSeed, PieceSpawner},
    stats::BoardStats,
};

/// Resolution pipeline state.
///
/// Exactly one pipeline runs per board. `Move` accepts external swap input;
/// every other phase belongs to the engine until the board settles again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Accepting swap input.
    Move,
    /// Sweeping matched pieces off the board.
    Destroying,
    /// Pieces falling to fill the gaps.
    Compacting,
    /// Spawning fresh pieces into remaining holes.
    Refilling,
    /// Re-checking for cascade matches.
    Evaluating,
    /// Final pause before control returns to `Move`.
    Settling,
}

/// The board engine: grid, match set and phase state machine in one
/// explicitly-owned object.
///
/// The engine is driven cooperatively: the host calls [`Self::tick`] with
/// elapsed wall-clock time, and the engine advances through destroy, compact
/// and refill steps separated by the configured settle delays. All shared
/// mutable state (grid, match set, per-piece flags) lives here; there are no
/// process-wide singletons and no timer threads.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    config: BoardConfig,
    grid: Grid,
    spawner: PieceSpawner,
    match_set: MatchSet,
    phase: Phase,
    phase_timer: Duration,
    swap: Option<SwapContext>,
    events: VecDeque<BoardEvent>,
    stats: BoardStats,
}

impl BoardEngine {
    /// Builds a board with a random seed.
    pub fn new(config: BoardConfig, layout: &BoardLayout) -> Result<Self, ConfigError> {
        Self::with_seed(config, layout, rand::random())
    }

    /// Like [`Self::new`], but fully deterministic for a given seed.
    pub fn with_seed(
        config: BoardConfig,
        layout: &BoardLayout,
        seed: BoardSeed,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        layout.validate(config.width, config.height)?;
        let mut grid = Grid::new(config.width, config.height, layout);
        let mut spawner = PieceSpawner::with_seed(config.palette, seed);
        generator::fill_initial(&mut grid, &mut spawner);
        Ok(Self {
            config,
            grid,
            spawner,
            match_set: MatchSet::default(),
            phase: Phase::Move,
            phase_timer: Duration::ZERO,
            swap: None,
            events: VecDeque::new(),
            stats: BoardStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn stats(&self) -> &BoardStats {
        &self.stats
    }

    /// Vertical offset where refill pieces visually spawn; passed through for
    /// hosts, never consulted by the resolution logic.
    #[must_use]
    pub fn spawn_offset(&self) -> usize {
        self.config.spawn_offset
    }

    /// Drains all queued output events in production order.
    pub fn drain_events(&mut self) -> impl Iterator<Item = BoardEvent> + '_ {
        self.events.drain(..)
    }

    /// Deadlock probe: `true` when no single swap anywhere could produce a
    /// match. Exposed as an extension point; the pipeline never calls it,
    /// hosts typically consult it after [`BoardEvent::BoardSettled`].
    #[must_use]
    pub fn is_deadlocked(&self) -> bool {
        !deadlock::has_any_legal_move(&self.grid)
    }

    /// Requests a swap of the pieces at `from` and `to`, accepted only while
    /// the board is in [`Phase::Move`].
    ///
    /// Swap requests originate from untrusted input-layer code, so malformed
    /// ones (out of bounds, non-adjacent, empty or blank cells) are rejected
    /// as a no-op rather than treated as errors. An in-form swap that
    /// produces no match is undone and reported via
    /// [`BoardEvent::SwapReverted`].
    ///
    /// Returns `true` when the swap was committed and resolution started.
    pub fn request_swap(&mut self, from: (usize, usize), to: (usize, usize)) -> bool {
        if !self.phase.is_move() {
            return false;
        }
        if !self.grid.in_bounds(from.0, from.1) || !self.grid.in_bounds(to.0, to.1) {
            return false;
        }
        let axis = match (from.0.abs_diff(to.0), from.1.abs_diff(to.1)) {
            (1, 0) => SwapAxis::Horizontal,
            (0, 1) => SwapAxis::Vertical,
            _ => return false,
        };
        if self.grid.piece_at(from.0, from.1).is_none() || self.grid.piece_at(to.0, to.1).is_none()
        {
            return false;
        }

        self.grid.swap_pieces(from, to);
        let activated = self.activate_color_bombs(from, to);
        if activated {
            match_finder::expand_specials(&mut self.grid, &mut self.match_set);
        } else {
            self.match_set = match_finder::find_matches(&mut self.grid);
        }
        if self.match_set.is_empty() {
            self.grid.swap_pieces(from, to);
            self.events.push_back(BoardEvent::SwapReverted);
            return false;
        }

        self.swap = Some(SwapContext {
            primary: to,
            partner: from,
            axis,
        });
        self.stats.record_swap_accepted();
        // The first destruction is immediate; pacing applies to cascades only
        self.enter(Phase::Destroying, Duration::ZERO);
        true
    }

    /// Advances the pipeline by the given elapsed time.
    ///
    /// Consumes leftover time across consecutive phases, so a large `elapsed`
    /// can run several steps at once. A no-op while the board is in
    /// [`Phase::Move`].
    pub fn tick(&mut self, elapsed: Duration) {
        let mut remaining = elapsed;
        while !self.phase.is_move() {
            if self.phase_timer > remaining {
                self.phase_timer -= remaining;
                return;
            }
            remaining -= self.phase_timer;
            self.phase_timer = Duration::ZERO;
            self.step_phase();
        }
    }

    fn enter(&mut self, phase: Phase, delay: Duration) {
        self.phase = phase;
        self.phase_timer = delay;
    }

    /// Runs the work of the current phase and schedules the next one.
    fn step_phase(&mut self) {
        let delays = self.config.delays;
        match self.phase {
            Phase::Move => {}
            Phase::Destroying => {
                self.destroy_matched();
                self.enter(Phase::Compacting, Duration::ZERO);
            }
            Phase::Compacting => {
                self.compact_columns();
                self.enter(Phase::Refilling, delays.compact_settle);
            }
            Phase::Refilling => {
                self.refill();
                self.enter(Phase::Evaluating, delays.refill_settle);
            }
            Phase::Evaluating => {
                self.match_set = match_finder::find_matches(&mut self.grid);
                if self.match_set.is_empty() {
                    self.swap = None;
                    self.enter(Phase::Settling, delays.final_settle);
                } else {
                    self.stats.record_cascade();
                    self.enter(Phase::Destroying, delays.cascade_pacing);
                }
            }
            Phase::Settling => {
                self.match_set.clear();
                self.stats.record_resolution_completed();
                self.events.push_back(BoardEvent::BoardSettled);
                self.enter(Phase::Move, Duration::ZERO);
            }
        }
    }

    /// Destroys every matched piece, promoting the swap-origin piece first
    /// when the match set is large enough and damaging breakable tiles
    /// underneath.
    fn destroy_matched(&mut self) {
        if self.match_set.len() >= 4 {
            promotion::apply(
                &mut self.grid,
                &self.match_set,
                self.swap.as_ref(),
                &mut self.events,
                &mut self.stats,
            );
        }
        for (column, row) in self.grid.positions() {
            let matched = self
                .grid
                .piece_at(column, row)
                .is_some_and(Piece::is_matched);
            if !matched {
                continue;
            }
            if let Some(remaining_hp) = self.grid.damage_breakable(column, row) {
                self.events.push_back(BoardEvent::BreakableDamaged {
                    column,
                    row,
                    remaining_hp,
                });
                if remaining_hp == 0 {
                    self.stats.record_breakable_destroyed();
                }
            }
            let piece = self
                .grid
                .take_piece(column, row)
                .expect("matched cell must hold a piece");
            self.events.push_back(BoardEvent::PieceDestroyed {
                column,
                row,
                color: piece.color(),
            });
            self.stats.record_piece_destroyed();
        }
        self.match_set.clear();
    }

    /// Gravity: per column, every empty non-blank cell pulls down the nearest
    /// piece above it.
    ///
    /// The bottom-to-top per-empty-cell rescan reproduces the reference
    /// semantics exactly: pieces fall to fill gaps, relative order preserved,
    /// falling past blank cells but never landing on them.
    fn compact_columns(&mut self) {
        for column in 0..self.grid.width() {
            for row in 0..self.grid.height() {
                if self.grid.is_blank(column, row) || self.grid.piece_at(column, row).is_some() {
                    continue;
                }
                let source = ((row + 1)..self.grid.height())
                    .find(|&r| self.grid.piece_at(column, r).is_some());
                if let Some(source) = source {
                    let piece = self
                        .grid
                        .take_piece(column, source)
                        .expect("source cell is occupied");
                    self.grid.place_piece(column, row, piece);
                }
            }
        }
    }

    /// Fills every remaining empty non-blank cell with a fresh random piece.
    ///
    /// No no-match guarantee applies here; refills may legitimately create
    /// immediate matches, which the evaluation loop then resolves.
    fn refill(&mut self) {
        for (column, row) in self.grid.positions() {
            if self.grid.is_blank(column, row) || self.grid.piece_at(column, row).is_some() {
                continue;
            }
            let color = self.spawner.spawn_color();
            self.grid.place_piece(column, row, Piece::new(color, column, row));
            self.events.push_back(BoardEvent::PieceSpawned { column, row, color });
        }
    }

    /// Swapping against a color bomb clears every piece of the partner's
    /// color board-wide instead of requiring a run.
    fn activate_color_bombs(&mut self, from: (usize, usize), to: (usize, usize)) -> bool {
        let mut activated = false;
        let mut set = std::mem::take(&mut self.match_set);
        set.clear();
        for (bomb, partner) in [(to, from), (from, to)] {
            let is_bomb = self
                .grid
                .piece_at(bomb.0, bomb.1)
                .is_some_and(|p| p.special() == Some(SpecialKind::ColorBomb));
            if !is_bomb {
                continue;
            }
            activated = true;
            let target_color = self.grid.piece_at(partner.0, partner.1).map(Piece::color);
            if let Some(target_color) = target_color {
                for (column, row) in self.grid.positions() {
                    let hit = self
                        .grid
                        .piece_at(column, row)
                        .is_some_and(|p| p.color() == target_color);
                    if hit {
                        match_finder::mark(&mut self.grid, &mut set, column, row);
                    }
                }
            }
            match_finder::mark(&mut self.grid, &mut set, bomb.0, bomb.1);
        }
        self.match_set = set;
        activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceColor, TileSpec};

    const TICK: Duration = Duration::from_millis(100);

    fn seed(byte: u8) -> BoardSeed {
        format!("{:032x}", u128::from_be_bytes([byte; 16]))
            .parse()
            .unwrap()
    }

    fn engine_with(rows: &[&str]) -> BoardEngine {
        let grid = Grid::from_rows(rows);
        let config = BoardConfig {
            width: grid.width(),
            height: grid.height(),
            ..BoardConfig::default()
        };
        BoardEngine {
            spawner: PieceSpawner::with_seed(config.palette, seed(9)),
            config,
            grid,
            match_set: MatchSet::default(),
            phase: Phase::Move,
            phase_timer: Duration::ZERO,
            swap: None,
            events: VecDeque::new(),
            stats: BoardStats::default(),
        }
    }

    fn run_until_settled(engine: &mut BoardEngine) {
        for _ in 0..10_000 {
            engine.tick(TICK);
            if engine.phase().is_move() {
                return;
            }
        }
        panic!("board failed to settle in bounded time");
    }

    fn column_colors(engine: &BoardEngine, column: usize) -> Vec<Option<PieceColor>> {
        (0..engine.grid().height())
            .map(|row| engine.grid().piece_at(column, row).map(Piece::color))
            .collect()
    }

    #[test]
    fn test_new_board_has_no_matches_and_accepts_input() {
        let engine = BoardEngine::with_seed(
            BoardConfig::default(),
            &BoardLayout::default(),
            seed(3),
        )
        .unwrap();
        assert!(engine.phase().is_move());
        assert!(!match_finder::has_any_match(engine.grid()));
    }

    #[test]
    fn test_layout_validation_is_fatal() {
        let layout = BoardLayout::new(vec![TileSpec::blank(99, 0)]);
        let result = BoardEngine::with_seed(BoardConfig::default(), &layout, seed(0));
        assert!(matches!(
            result,
            Err(ConfigError::TileOutOfBounds { x: 99, .. })
        ));
    }

    #[test]
    fn test_gravity_compacts_in_relative_order() {
        // Pieces at rows 2, 5, 7 of an 8-high column
        let mut engine = engine_with(&["B", ".", "G", ".", ".", "R", ".", "."]);
        engine.compact_columns();
        assert_eq!(
            column_colors(&engine, 0),
            vec![
                Some(PieceColor::Red),
                Some(PieceColor::Green),
                Some(PieceColor::Blue),
                None,
                None,
                None,
                None,
                None,
            ]
        );
        // Stored coordinates follow the relocation
        assert_eq!(engine.grid().piece_at(0, 2).unwrap().row(), 2);
    }

    #[test]
    fn test_gravity_falls_past_blank_cells() {
        let mut engine = engine_with(&[".", "B", "G", "#", "."]);
        engine.compact_columns();
        assert_eq!(
            column_colors(&engine, 0),
            vec![
                Some(PieceColor::Green),
                None,
                Some(PieceColor::Blue),
                None,
                None,
            ]
        );
        assert!(engine.grid().is_blank(0, 1));
    }

    #[test]
    fn test_refill_skips_blank_cells_and_emits_spawns() {
        let mut engine = engine_with(&[
            "...", //
            ".#.", //
            "R.B", //
        ]);
        engine.refill();
        assert!(engine.grid().is_blank(1, 1));
        assert!(engine.grid().piece_at(1, 1).is_none());
        let spawned = engine
            .drain_events()
            .filter(|e| matches!(e, BoardEvent::PieceSpawned { .. }))
            .count();
        // 9 cells, 1 blank, 2 pre-occupied
        assert_eq!(spawned, 6);
    }

    #[test]
    fn test_swap_rejected_outside_move_phase() {
        let mut engine = engine_with(&[
            "BGBGB", //
            "GBGBG", //
            "BGBGB", //
            "GBRBG", //
            "RRGRR", //
        ]);
        assert!(engine.request_swap((2, 0), (2, 1)));
        // Pipeline is running now; further swaps must be rejected
        assert!(!engine.request_swap((0, 3), (0, 4)));
    }

    #[test]
    fn test_swap_rejects_malformed_input() {
        let mut engine = engine_with(&[
            "GBR", //
            "BGB", //
            "GBG", //
        ]);
        // Out of bounds is a no-op, not a panic
        assert!(!engine.request_swap((0, 0), (0, 99)));
        assert!(!engine.request_swap((9, 9), (9, 8)));
        // Non-adjacent and self swaps
        assert!(!engine.request_swap((0, 0), (2, 0)));
        assert!(!engine.request_swap((1, 1), (1, 1)));
        assert!(engine.phase().is_move());
    }

    #[test]
    fn test_no_match_swap_reverts() {
        let mut engine = engine_with(&[
            "GBR", //
            "BGB", //
            "GBG", //
        ]);
        assert!(!engine.request_swap((0, 0), (1, 0)));
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(events, vec![BoardEvent::SwapReverted]);
        assert!(engine.phase().is_move());
        assert_eq!(
            engine.grid().piece_at(0, 0).unwrap().color(),
            PieceColor::Green
        );
    }

    #[test]
    fn test_full_resolution_terminates_and_settles() {
        let mut engine = engine_with(&[
            "BGBGB", //
            "GBGBG", //
            "BGBGB", //
            "GBRBG", //
            "RRGRR", //
        ]);
        assert!(engine.request_swap((2, 0), (2, 1)));
        run_until_settled(&mut engine);

        let stats = engine.stats();
        assert_eq!(stats.swaps_accepted(), 1);
        assert!(stats.pieces_destroyed() >= 4);
        assert_eq!(stats.resolutions_completed(), 1);
        assert!(!match_finder::has_any_match(engine.grid()));
        // The board is full again after refills
        for (c, r) in engine.grid().positions() {
            assert!(engine.grid().piece_at(c, r).is_some());
        }
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events.last(),
            Some(&BoardEvent::BoardSettled),
            "settle event must close the pipeline"
        );
    }

    #[test]
    fn test_line_five_swap_creates_color_bomb() {
        let mut engine = engine_with(&[
            "BGBGB", //
            "GBGBG", //
            "BGBGB", //
            "GBRBG", //
            "RRGRR", //
        ]);
        // Moving the G at (2, 0) up completes R R R R R along the bottom
        assert!(engine.request_swap((2, 0), (2, 1)));
        // Zero elapsed time still runs the immediate destroy + compact steps
        engine.tick(Duration::ZERO);
        let promoted: Vec<_> = engine
            .drain_events()
            .filter(|e| matches!(e, BoardEvent::PiecePromoted { .. }))
            .collect();
        assert_eq!(
            promoted,
            vec![BoardEvent::PiecePromoted {
                column: 2,
                row: 0,
                special: SpecialKind::ColorBomb,
            }]
        );
        // The promoted partner survived the sweep
        assert_eq!(
            engine.grid().piece_at(2, 0).unwrap().special(),
            Some(SpecialKind::ColorBomb)
        );
    }

    #[test]
    fn test_breakable_tile_depletes_across_two_cycles() {
        let mut engine = engine_with(&[
            "GYB", //
            "YBG", //
            "RRR", //
        ]);
        engine.grid.set_breakable(0, 0, 2);

        engine.match_set = match_finder::find_matches(&mut engine.grid);
        engine.destroy_matched();
        assert_eq!(
            engine.grid().breakable_at(0, 0).map(|t| t.hit_points()),
            Some(1)
        );

        // Second cycle: a fresh piece on the same cell is destroyed again
        engine
            .grid
            .place_piece(0, 0, Piece::new(PieceColor::Red, 0, 0));
        engine.grid.piece_at_mut(0, 0).unwrap().set_matched(true);
        engine.match_set.insert(0, 0);
        engine.destroy_matched();
        assert!(engine.grid().breakable_at(0, 0).is_none());
        assert_eq!(engine.stats().breakables_destroyed(), 1);

        let damage: Vec<_> = engine
            .drain_events()
            .filter(|e| matches!(e, BoardEvent::BreakableDamaged { .. }))
            .collect();
        assert_eq!(
            damage,
            vec![
                BoardEvent::BreakableDamaged {
                    column: 0,
                    row: 0,
                    remaining_hp: 1,
                },
                BoardEvent::BreakableDamaged {
                    column: 0,
                    row: 0,
                    remaining_hp: 0,
                },
            ]
        );
    }

    #[test]
    fn test_color_bomb_swap_clears_partner_color() {
        let mut engine = engine_with(&[
            "GYBGY", //
            "YRGYB", //
            "GBYRG", //
        ]);
        engine
            .grid
            .piece_at_mut(2, 0)
            .unwrap()
            .promote(SpecialKind::ColorBomb);
        // Swap the bomb with the R to its right
        assert!(engine.request_swap((2, 0), (3, 0)));
        engine.tick(Duration::ZERO);

        let destroyed: Vec<_> = engine
            .drain_events()
            .filter_map(|e| match e {
                BoardEvent::PieceDestroyed { color, .. } => Some(color),
                _ => None,
            })
            .collect();
        // Both R pieces plus the bomb itself (a Y piece underneath the tag)
        assert_eq!(destroyed.len(), 3);
        assert_eq!(
            destroyed
                .iter()
                .filter(|&&c| c == PieceColor::Red)
                .count(),
            2
        );
    }

    #[test]
    fn test_blank_cells_survive_a_full_resolution() {
        let layout = BoardLayout::new(vec![TileSpec::blank(3, 3), TileSpec::blank(4, 0)]);
        let config = BoardConfig {
            palette: 4,
            ..BoardConfig::default()
        };
        let mut engine = BoardEngine::with_seed(config, &layout, seed(11)).unwrap();

        if let Some((from, to)) = deadlock::find_legal_move(engine.grid()) {
            assert!(engine.request_swap(from, to));
            run_until_settled(&mut engine);
        }
        assert!(engine.grid().is_blank(3, 3));
        assert!(engine.grid().is_blank(4, 0));
        assert!(engine.grid().piece_at(3, 3).is_none());
        assert!(engine.grid().piece_at(4, 0).is_none());
    }

    #[test]
    fn test_tick_respects_phase_delays() {
        let mut engine = engine_with(&[
            "BGBGB", //
            "GBGBG", //
            "BGBGB", //
            "GBRBG", //
            "RRGRR", //
        ]);
        assert!(engine.request_swap((2, 0), (2, 1)));
        // Destroy and compact run immediately; refill waits its settle delay
        engine.tick(Duration::ZERO);
        assert_eq!(engine.phase(), Phase::Refilling);
        engine.tick(Duration::from_millis(399));
        assert_eq!(engine.phase(), Phase::Refilling);
        engine.tick(Duration::from_millis(1));
        assert_eq!(engine.phase(), Phase::Evaluating);
    }
}
