use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::{Grid, SpecialKind};

use super::{
    events::BoardEvent,
    match_finder::{MatchSet, is_line_shape},
    stats::BoardStats,
};

/// Orientation of the player's last swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwapAxis {
    Horizontal,
    Vertical,
}

/// The two cells involved in the last accepted swap.
///
/// `primary` is where the piece the player moved now sits; `partner` is the
/// piece it displaced. Promotion rewards one of the two, preferring the
/// primary, so the player's action is rewarded predictably.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SwapContext {
    pub(crate) primary: (usize, usize),
    pub(crate) partner: (usize, usize),
    pub(crate) axis: SwapAxis,
}

/// Promotes the swap-origin piece according to the match set's size and
/// shape, before destruction consumes the matched flags.
///
/// - size 4 or 7: line-clearing bomb, axis following the swap direction
/// - size 5 or 8: straight line-5 shape makes a color bomb, an irregular
///   cluster makes an adjacent bomb
/// - anything else: no promotion
///
/// Without a swap context (or with neither swapped piece matched) this is a
/// no-op; cascades that nobody triggered do not mint specials.
pub(crate) fn apply(
    grid: &mut Grid,
    set: &MatchSet,
    swap: Option<&SwapContext>,
    events: &mut VecDeque<BoardEvent>,
    stats: &mut BoardStats,
) {
    let Some(swap) = swap else {
        return;
    };
    let special = match set.len() {
        4 | 7 => match swap.axis {
            SwapAxis::Horizontal => SpecialKind::RowBomb,
            SwapAxis::Vertical => SpecialKind::ColumnBomb,
        },
        5 | 8 => {
            if is_line_shape(set) {
                SpecialKind::ColorBomb
            } else {
                SpecialKind::AdjacentBomb
            }
        }
        _ => return,
    };

    let candidates: ArrayVec<(usize, usize), 2> = [swap.primary, swap.partner].into();
    let target = candidates
        .into_iter()
        .find(|&(c, r)| grid.piece_at(c, r).is_some_and(|p| p.is_matched()));
    let Some((column, row)) = target else {
        return;
    };
    let piece = grid
        .piece_at_mut(column, row)
        .expect("promotion target vanished");
    if piece.special() == Some(special) {
        // Already carrying this bomb; let it be destroyed normally
        return;
    }
    piece.promote(special);
    events.push_back(BoardEvent::PiecePromoted {
        column,
        row,
        special,
    });
    stats.record_special_created();
}
