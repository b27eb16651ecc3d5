//! Single-ply heuristic opponent.
//!
//! Rule order, each step short-circuiting:
//!
//! 1. With probability `randomness`, a uniformly random empty cell.
//! 2. With probability `tactical_thinking`, complete an own two-in-a-row,
//!    else block the human's two-in-a-row.
//! 3. The center, if empty.
//! 4. A uniformly random empty corner.
//! 5. A uniformly random empty cell.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::rules::TRIPLES;
use crate::{AiProfile, Board, Dice, Turn};

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Which rule produced the AI's move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MoveReason {
    /// Unconditioned random move.
    Random,
    /// Completed an own triple.
    Win,
    /// Blocked a human triple.
    Block,
    /// Took the center.
    Center,
    /// Took a free corner.
    Corner,
    /// Any remaining cell.
    Fallback,
}

impl MoveReason {
    /// Returns `true` for moves produced by the win/block scan.
    pub fn is_tactical(self) -> bool {
        matches!(self, Self::Win | Self::Block)
    }
}

/// A cell chosen by the AI together with the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiMove {
    /// Chosen cell index; always empty on the board it was chosen for.
    pub index: usize,
    /// Rule that fired.
    pub reason: MoveReason,
}

/// Picks the AI's next cell without touching the board.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(
    skip(board, dice),
    fields(randomness = profile.randomness(), tactical = profile.tactical_thinking())
)]
pub fn choose_move<D: Dice + ?Sized>(
    board: &Board,
    profile: &AiProfile,
    dice: &mut D,
) -> Option<AiMove> {
    let empties = board.empty_cells();
    if empties.is_empty() {
        debug!("No empty cell left for the AI");
        return None;
    }

    if dice.roll() < profile.randomness() {
        return Some(pick(&empties, dice, MoveReason::Random));
    }

    if dice.roll() < profile.tactical_thinking() {
        if let Some(index) = find_completing_cell(board, Turn::Opponent) {
            return Some(AiMove {
                index,
                reason: MoveReason::Win,
            });
        }
        if let Some(index) = find_completing_cell(board, Turn::Human) {
            return Some(AiMove {
                index,
                reason: MoveReason::Block,
            });
        }
    }

    if board.is_empty(CENTER) {
        return Some(AiMove {
            index: CENTER,
            reason: MoveReason::Center,
        });
    }

    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&index| board.is_empty(index))
        .collect();
    if !corners.is_empty() {
        return Some(pick(&corners, dice, MoveReason::Corner));
    }

    Some(pick(&empties, dice, MoveReason::Fallback))
}

/// Finds the empty cell of the first triple (in [`TRIPLES`] order) where
/// `side` already holds the other two cells.
#[instrument(skip(board))]
pub fn find_completing_cell(board: &Board, side: Turn) -> Option<usize> {
    let mark = side.mark();
    TRIPLES.iter().find_map(|triple| {
        let owned = triple
            .iter()
            .filter(|&&index| board.get(index) == Some(mark))
            .count();
        let open = triple.iter().copied().find(|&index| board.is_empty(index));
        if owned == 2 { open } else { None }
    })
}

fn pick<D: Dice + ?Sized>(options: &[usize], dice: &mut D, reason: MoveReason) -> AiMove {
    let index = options[dice.choose(options.len()).min(options.len() - 1)];
    AiMove { index, reason }
}
