//! Game engine: one session, strict turn order, synchronous AI replies.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::ai::{self, AiMove};
use crate::{AiProfile, Board, Dice, GameStatus, InvalidMove, Outcome, RngDice, Turn, rules};

/// What happened during an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveReport {
    /// Terminal outcome reached by the human move or the AI reply.
    pub winner: Option<Outcome>,
    /// The AI's reply, absent when the human move ended the game.
    pub ai_move: Option<AiMove>,
}

/// Flat move result handed to a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// Whether the human move was applied.
    pub accepted: bool,
    /// Terminal outcome, if the game ended.
    pub winner: Option<Outcome>,
    /// Cell the AI answered with, if it moved.
    pub ai_move_index: Option<usize>,
}

impl From<Result<MoveReport, InvalidMove>> for MoveResponse {
    fn from(result: Result<MoveReport, InvalidMove>) -> Self {
        match result {
            Ok(report) => Self {
                accepted: true,
                winner: report.winner,
                ai_move_index: report.ai_move.map(|m| m.index),
            },
            Err(_) => Self {
                accepted: false,
                winner: None,
                ai_move_index: None,
            },
        }
    }
}

/// Tic-tac-toe engine owning a single game session.
///
/// The human always moves first. Each accepted human move is answered by
/// the AI inside the same [`Engine::apply_move`] call, so callers only ever
/// observe the board on the human's turn or in a terminal state.
#[derive(Debug)]
pub struct Engine<D = RngDice<StdRng>> {
    board: Board,
    turn: Turn,
    status: GameStatus,
    profile: AiProfile,
    dice: D,
}

impl Engine {
    /// Creates an engine whose AI draws from an OS-seeded generator.
    #[instrument]
    pub fn new(profile: AiProfile) -> Self {
        Self::with_dice(profile, RngDice::from_os())
    }
}

impl<D: Dice> Engine<D> {
    /// Creates an engine with an explicit random source.
    #[instrument(skip(dice))]
    pub fn with_dice(profile: AiProfile, dice: D) -> Self {
        info!("Creating engine");
        Self {
            board: Board::new(),
            turn: Turn::Human,
            status: GameStatus::InProgress,
            profile,
            dice,
        }
    }

    /// Starts a new session: empty board, human to move.
    ///
    /// The previous board is discarded.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Turn::Human;
        self.status = GameStatus::InProgress;
        info!("Session reset");
    }

    /// Starts a new session against a different AI profile.
    #[instrument(skip(self))]
    pub fn reset_with_profile(&mut self, profile: AiProfile) {
        self.profile = profile;
        self.reset();
    }

    /// Applies the human move at `index` and, if the game goes on, the AI's
    /// reply.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the index is off the board, the cell is
    /// taken, or the session already ended. State is unchanged on error.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn apply_move(&mut self, index: usize) -> Result<MoveReport, InvalidMove> {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "Rejecting move after game end");
            return Err(InvalidMove::GameOver);
        }

        self.board.place(index, self.turn)?;
        self.status = rules::evaluate(&self.board);
        if let Some(outcome) = self.status.outcome() {
            info!(%outcome, "Game over after human move");
            return Ok(MoveReport {
                winner: Some(outcome),
                ai_move: None,
            });
        }

        self.turn = self.turn.other();
        let mut report = MoveReport::default();

        if self.turn == Turn::Opponent
            && let Some(reply) = ai::choose_move(&self.board, &self.profile, &mut self.dice)
        {
            self.board.place(reply.index, Turn::Opponent)?;
            debug!(index = reply.index, reason = %reply.reason, "AI moved");
            report.ai_move = Some(reply);

            self.status = rules::evaluate(&self.board);
            if let Some(outcome) = self.status.outcome() {
                info!(%outcome, "Game over after AI move");
                report.winner = Some(outcome);
                return Ok(report);
            }
            self.turn = self.turn.other();
        }

        Ok(report)
    }

    /// Returns the current board.
    pub fn current_board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the active AI profile.
    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }
}
