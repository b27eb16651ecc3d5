//! Session controller: glues engine results to match record creation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tictactoe_engine::{AiProfile, Dice, Engine, InvalidMove, MoveReport, RngDice};
use tracing::{debug, info, instrument, warn};

use crate::{
    GUEST_NAME, MatchRecord, PlayerStats, RecordStore, fetch_or_empty, normalize_player_name,
};

/// Source of wall-clock time for session timing.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Result of handing a finished game to a store or rating service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitStatus {
    /// Whether the record was accepted.
    pub ok: bool,
    /// Failure description when `ok` is false.
    pub error: Option<String>,
}

impl SubmitStatus {
    /// Successful submission.
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    /// Failed submission.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// What one [`SessionController::play`] call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Engine result for the move.
    pub report: MoveReport,
    /// Record created when the move finished the game.
    pub record: Option<MatchRecord>,
    /// Outcome of saving that record.
    pub submission: Option<SubmitStatus>,
}

/// Callback fired once per completed submission.
pub type SubmitListener = Box<dyn Fn(&SubmitStatus) + Send + Sync>;

/// Runs games for one player and records every finished game.
///
/// A failed save is reported but never undoes the game or blocks the next
/// one.
pub struct SessionController<D = RngDice<StdRng>> {
    engine: Engine<D>,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    player_name: String,
    started_at: DateTime<Utc>,
    listener: Option<SubmitListener>,
}

impl<D: fmt::Debug> fmt::Debug for SessionController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("engine", &self.engine)
            .field("player_name", &self.player_name)
            .field("started_at", &self.started_at)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<D: Dice> SessionController<D> {
    /// Creates a controller timing sessions with the system clock.
    #[instrument(skip_all)]
    pub fn new(engine: Engine<D>, store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(engine, store, Arc::new(SystemClock))
    }

    /// Creates a controller with an explicit clock.
    #[instrument(skip_all)]
    pub fn with_clock(
        engine: Engine<D>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!("Creating SessionController");
        let started_at = clock.now();
        Self {
            engine,
            store,
            clock,
            player_name: GUEST_NAME.to_string(),
            started_at,
            listener: None,
        }
    }

    /// Registers the callback fired after every submission.
    pub fn on_submit(&mut self, listener: impl Fn(&SubmitStatus) + Send + Sync + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Sets the name stored with future records; blank names become "Guest".
    #[instrument(skip(self))]
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = normalize_player_name(name);
        debug!(player = %self.player_name, "Player name set");
    }

    /// Returns the current player name.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Returns the engine.
    pub fn engine(&self) -> &Engine<D> {
        &self.engine
    }

    /// Starts a new game and restarts the session timer.
    #[instrument(skip(self), fields(player = %self.player_name))]
    pub fn start(&mut self) {
        self.engine.reset();
        self.started_at = self.clock.now();
        info!("Session started");
    }

    /// Starts a new game against a different AI profile.
    #[instrument(skip(self), fields(player = %self.player_name))]
    pub fn start_with_profile(&mut self, profile: AiProfile) {
        self.engine.reset_with_profile(profile);
        self.started_at = self.clock.now();
        info!("Session started");
    }

    /// Plays the human move at `index`; records the game if it ended.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] when the engine rejects the move. Nothing is
    /// recorded in that case.
    #[instrument(skip(self), fields(player = %self.player_name))]
    pub fn play(&mut self, index: usize) -> Result<TurnReport, InvalidMove> {
        let report = self.engine.apply_move(index)?;
        let Some(winner) = report.winner else {
            return Ok(TurnReport {
                report,
                record: None,
                submission: None,
            });
        };

        let now = self.clock.now();
        let duration = elapsed_whole_seconds(self.started_at, now);
        let record = MatchRecord::new(&self.player_name, duration, winner, now);
        info!(%winner, duration, "Game finished");

        let status = self.submit(&record);
        Ok(TurnReport {
            report,
            record: Some(record),
            submission: Some(status),
        })
    }

    /// [`play`](Self::play) for callers on a multi-threaded tokio runtime.
    ///
    /// The store write on a finished game blocks, so the worker thread is
    /// handed back to the runtime while the move runs.
    ///
    /// # Errors
    ///
    /// Same as [`play`](Self::play).
    ///
    /// # Panics
    ///
    /// Panics when called from a current-thread runtime.
    pub fn play_on_runtime(&mut self, index: usize) -> Result<TurnReport, InvalidMove> {
        tokio::task::block_in_place(|| self.play(index))
    }

    /// Whole seconds since the session started.
    pub fn elapsed_seconds(&self) -> u64 {
        elapsed_whole_seconds(self.started_at, self.clock.now())
    }

    /// Local statistics for the current player; zeros if the store fails.
    #[instrument(skip(self), fields(player = %self.player_name))]
    pub fn player_stats(&self) -> PlayerStats {
        crate::player_stats(&fetch_or_empty(self.store.as_ref()), &self.player_name)
    }

    fn submit(&self, record: &MatchRecord) -> SubmitStatus {
        let status = match self.store.save(record) {
            Ok(()) => SubmitStatus::success(),
            Err(e) => {
                warn!(error = %e, id = %record.id(), "Failed to save match record");
                SubmitStatus::failure(e.message)
            }
        };
        if let Some(listener) = &self.listener {
            listener(&status);
        }
        status
    }
}

fn elapsed_whole_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - start).num_seconds()).unwrap_or(0)
}
