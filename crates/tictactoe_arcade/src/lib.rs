//! Human-vs-AI tic-tac-toe with persisted match history and a leaderboard.
//!
//! # Architecture
//!
//! - **Session**: drives a [`tictactoe_engine::Engine`] and records every finished game
//! - **Stores**: append-only [`RecordStore`]s, in memory or in SQLite
//! - **Rating**: pure leaderboard and per-player statistics over records
//! - **Remote**: optional shared rating service with local fallback
//!
//! Storage and network failures never interrupt play. They degrade to
//! empty data and are reported as [`SubmitStatus`] values or log warnings.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod format;
mod leaderboard_service;
mod rating;
mod record;
mod remote;
mod session;
mod store;

// Crate-level exports - Records and storage
pub use db::{MatchRepository, StorageError};
pub use record::{GUEST_NAME, MatchRecord, normalize_player_name};
pub use store::{MemoryStore, RecordStore, fetch_or_empty};

// Crate-level exports - Rating
pub use leaderboard_service::{LeaderboardService, LeaderboardView, RatingSource};
pub use rating::{
    LeaderboardEntry, PlayerStats, compute_leaderboard, longest_win_streak, player_stats,
    win_ratio,
};
pub use remote::{HttpRatingService, NetworkError, RatingService};

// Crate-level exports - Session
pub use session::{Clock, SessionController, SubmitListener, SubmitStatus, SystemClock, TurnReport};

// Crate-level exports - Configuration and display
pub use config::{ArcadeConfig, ConfigError};
pub use format::{format_clock, format_duration};
