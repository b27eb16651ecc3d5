//! Tic-tac-toe engine with a difficulty-tiered heuristic opponent.
//!
//! # Architecture
//!
//! - **Board**: nine cells with occupancy rules
//! - **Rules**: win and draw detection over the eight triples
//! - **AI**: single-ply heuristic steered by an [`AiProfile`]
//! - **Engine**: one session, strict turn order, synchronous AI replies
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{AiProfile, Engine, RngDice};
//!
//! let mut engine = Engine::with_dice(AiProfile::HARD, RngDice::seeded(1));
//! let report = engine.apply_move(0).expect("Opening move is legal");
//! assert_eq!(report.ai_move.map(|m| m.index), Some(4));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod dice;
mod engine;
mod error;
mod profile;
mod types;

pub mod ai;
pub mod rules;

// Crate-level exports - Domain types
pub use types::{BOARD_SIZE, Board, Cell, GameStatus, Outcome, Turn};

// Crate-level exports - Errors
pub use error::{InvalidMove, ProfileError};

// Crate-level exports - AI
pub use ai::{AiMove, MoveReason};
pub use dice::{Dice, RngDice, ScriptedDice};
pub use profile::{AiProfile, Difficulty};

// Crate-level exports - Engine
pub use engine::{Engine, MoveReport, MoveResponse};
