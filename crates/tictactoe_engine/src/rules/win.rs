//! Win detection logic for tic-tac-toe.

use crate::{Board, Turn};
use tracing::instrument;

/// The eight winning index triples: rows, columns, diagonals.
#[rustfmt::skip]
pub const TRIPLES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(side)` if that side holds all three cells of a triple,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Turn> {
    let cells = board.cells();
    TRIPLES.iter().find_map(|&[a, b, c]| {
        let owner = cells[a].owner()?;
        (cells[a] == cells[b] && cells[b] == cells[c]).then_some(owner)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(board: &mut Board, indices: &[usize], turn: Turn) {
        for &index in indices {
            board.place(index, turn).expect("Place failed");
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        mark(&mut board, &[0, 1, 2], Turn::Human);
        assert_eq!(check_winner(&board), Some(Turn::Human));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        mark(&mut board, &[1, 4, 7], Turn::Opponent);
        assert_eq!(check_winner(&board), Some(Turn::Opponent));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        mark(&mut board, &[2, 4, 6], Turn::Opponent);
        assert_eq!(check_winner(&board), Some(Turn::Opponent));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        mark(&mut board, &[0, 1], Turn::Human);
        mark(&mut board, &[2], Turn::Opponent);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_triple_wins() {
        for triple in TRIPLES {
            let mut board = Board::new();
            mark(&mut board, &triple, Turn::Human);
            assert_eq!(check_winner(&board), Some(Turn::Human), "triple {:?}", triple);
        }
    }
}
