//! Leaderboard business logic layer.

use std::fmt;
use std::sync::Arc;

use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

use crate::{
    LeaderboardEntry, MatchRecord, PlayerStats, RatingService, RecordStore, StorageError,
    SubmitStatus, compute_leaderboard, player_stats,
};

/// Where a leaderboard's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RatingSource {
    /// The remote rating service answered.
    Remote,
    /// Local records, either by choice or after a remote failure.
    Local,
}

/// A computed leaderboard plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct LeaderboardView {
    /// Ranked entries, best ratio first.
    entries: Vec<LeaderboardEntry>,
    /// Which records the entries were computed from.
    source: RatingSource,
    /// Why the remote service was not used, if it failed.
    remote_error: Option<String>,
    /// Why local records were unavailable, if they were.
    storage_error: Option<String>,
}

/// Service layer for leaderboard and rating operations.
///
/// Prefers the remote rating service when one is configured and falls back
/// to the local record store whenever it fails. A failing local store
/// yields an empty leaderboard, never an error.
#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn RecordStore>,
    remote: Option<Arc<dyn RatingService>>,
}

impl fmt::Debug for LeaderboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaderboardService")
            .field("has_remote", &self.remote.is_some())
            .finish_non_exhaustive()
    }
}

impl LeaderboardService {
    /// Creates a service backed only by the local store.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        info!("Creating LeaderboardService");
        Self {
            store,
            remote: None,
        }
    }

    /// Adds a remote rating service.
    #[instrument(skip_all)]
    pub fn with_remote(mut self, remote: Arc<dyn RatingService>) -> Self {
        debug!("Remote rating service attached");
        self.remote = Some(remote);
        self
    }

    /// Returns `true` when a remote rating service is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Computes the leaderboard, remote first, local on failure.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> LeaderboardView {
        let mut remote_error = None;

        if let Some(remote) = &self.remote {
            match remote.fetch().await {
                Ok(records) => {
                    info!(count = records.len(), "Using remote ratings");
                    return LeaderboardView {
                        entries: compute_leaderboard(&records),
                        source: RatingSource::Remote,
                        remote_error: None,
                        storage_error: None,
                    };
                }
                Err(e) => {
                    warn!(error = %e, "Remote ratings unavailable, falling back to local records");
                    remote_error = Some(e.message);
                }
            }
        }

        let (records, storage_error) = match self.load_local().await {
            Ok(records) => (records, None),
            Err(e) => {
                warn!(error = %e, "Local records unavailable, leaderboard is empty");
                (Vec::new(), Some(e.message))
            }
        };

        LeaderboardView {
            entries: compute_leaderboard(&records),
            source: RatingSource::Local,
            remote_error,
            storage_error,
        }
    }

    /// Local statistics for one player; zeros if the store fails.
    #[instrument(skip(self))]
    pub async fn player_stats(&self, name: &str) -> PlayerStats {
        match self.load_local().await {
            Ok(records) => player_stats(&records, name),
            Err(e) => {
                warn!(error = %e, "Local records unavailable, reporting empty stats");
                PlayerStats::default()
            }
        }
    }

    /// Sends a finished game to the remote rating service.
    ///
    /// Returns `None` when no remote service is configured.
    #[instrument(skip(self, record), fields(id = %record.id()))]
    pub async fn publish(&self, record: &MatchRecord) -> Option<SubmitStatus> {
        let remote = self.remote.as_ref()?;
        let status = match remote.submit(record).await {
            Ok(()) => SubmitStatus::success(),
            Err(e) => {
                warn!(error = %e, "Remote submit failed");
                SubmitStatus::failure(e.message)
            }
        };
        Some(status)
    }

    /// Reads the store off the async runtime.
    async fn load_local(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.fetch_all())
            .await
            .map_err(|e| StorageError::new(format!("Store task failed: {}", e)))?
    }
}
