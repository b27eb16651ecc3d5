//! Terminal-state rules for tic-tac-toe.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{TRIPLES, check_winner};

use crate::{Board, GameStatus};
use tracing::instrument;

/// Evaluates the board: a completed triple wins, otherwise a full board is
/// a draw, otherwise the game is still in progress.
///
/// Pure: the same board always yields the same status.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
