//! Immutable record of one finished game.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use tictactoe_engine::Outcome;
use tracing::instrument;
use uuid::Uuid;

/// Name recorded when the player gives none.
pub const GUEST_NAME: &str = "Guest";

/// Trims `name`, substituting [`GUEST_NAME`] when nothing is left.
#[instrument]
pub fn normalize_player_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        GUEST_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Applies [`normalize_player_name`] to names decoded from JSON.
fn deserialize_player_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_player_name(&raw))
}

/// One finished game. `winner` is relative to the record's human player.
///
/// Serialized with the field names the rating service exchanges:
/// `id`, `name`, `durationSeconds`, `winner`, `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    id: String,
    #[serde(deserialize_with = "deserialize_player_name")]
    name: String,
    duration_seconds: u64,
    winner: Outcome,
    #[serde(rename = "date")]
    played_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Creates a record with a fresh id.
    #[instrument(skip(name))]
    pub fn new(
        name: &str,
        duration_seconds: u64,
        winner: Outcome,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: normalize_player_name(name),
            duration_seconds,
            winner,
            played_at,
        }
    }

    /// Rebuilds a record read back from storage.
    pub(crate) fn restore(
        id: String,
        name: String,
        duration_seconds: u64,
        winner: Outcome,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            duration_seconds,
            winner,
            played_at,
        }
    }
}
