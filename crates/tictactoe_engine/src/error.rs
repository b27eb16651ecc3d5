//! Engine error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move was rejected. A rejected move never changes engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error)]
pub enum InvalidMove {
    /// Index is not one of the nine cells.
    #[display("Cell {} is outside the board (must be 0-8)", index)]
    OutOfBounds {
        /// The rejected index.
        index: usize,
    },
    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", index)]
    Occupied {
        /// The rejected index.
        index: usize,
    },
    /// The session already reached a terminal state.
    #[display("Game is already over")]
    GameOver,
}

/// Invalid AI profile parameters, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Profile error: {} at {}:{}", message, file, line)]
pub struct ProfileError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProfileError {
    /// Creates a new profile error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
