//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::InvalidMove;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Side whose turn it is.
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
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Turn {
    /// The human player (always moves first).
    Human,
    /// The heuristic AI opponent.
    Opponent,
}

impl Turn {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Turn::Human => Turn::Opponent,
            Turn::Opponent => Turn::Human,
        }
    }

    /// Returns the cell value this side leaves on the board.
    pub fn mark(self) -> Cell {
        match self {
            Turn::Human => Cell::Human,
            Turn::Opponent => Cell::Opponent,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// Cell taken by the human player.
    Human,
    /// Cell taken by the AI opponent.
    Opponent,
}

impl Cell {
    /// Returns the side occupying this cell, if any.
    pub fn owner(self) -> Option<Turn> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Turn::Human),
            Cell::Opponent => Some(Turn::Opponent),
        }
    }
}

/// Result of a finished game, always seen from the human player's side.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The human player completed a triple.
    Human,
    /// The AI opponent completed a triple.
    Opponent,
    /// The board filled up with no triple.
    Draw,
}

impl From<Turn> for Outcome {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Human => Outcome::Human,
            Turn::Opponent => Outcome::Opponent,
        }
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// Game ended in a win.
    Won(Turn),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns `true` once no more moves are accepted.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the terminal outcome, or `None` while the game is in progress.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(turn) => Some(Outcome::from(*turn)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored row-major, so `index = row * 3 + col`. A cell only ever
/// goes from [`Cell::Empty`] to an occupied value; the whole board is cleared
/// by replacing it with [`Board::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a cell exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Indices of every empty cell, in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Places `turn`'s mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::OutOfBounds`] for indices past 8 and
    /// [`InvalidMove::Occupied`] when the cell is taken. The board is left
    /// untouched on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, turn: Turn) -> Result<(), InvalidMove> {
        match self.get(index) {
            None => Err(InvalidMove::OutOfBounds { index }),
            Some(Cell::Empty) => {
                self.cells[index] = turn.mark();
                Ok(())
            }
            Some(_) => Err(InvalidMove::Occupied { index }),
        }
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number so the output doubles as a
    /// move prompt.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Human => "X".to_string(),
                    Cell::Opponent => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
