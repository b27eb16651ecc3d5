//! Database rows for match records.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_new::new;
use diesel::prelude::*;
use tictactoe_engine::Outcome;
use tracing::instrument;

use crate::MatchRecord;
use crate::db::{StorageError, schema};

/// Stored match record row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::match_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MatchRow {
    id: String,
    player_name: String,
    duration_seconds: i64,
    winner: String,
    played_at: NaiveDateTime,
}

impl TryFrom<MatchRow> for MatchRecord {
    type Error = StorageError;

    #[instrument(skip(row), fields(id = %row.id, winner = %row.winner))]
    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let winner = Outcome::from_str(&row.winner).map_err(|_| {
            StorageError::malformed_record(&row.id, format!("winner '{}'", row.winner))
        })?;
        let duration_seconds = u64::try_from(row.duration_seconds).map_err(|_| {
            StorageError::malformed_record(&row.id, format!("duration {}", row.duration_seconds))
        })?;
        Ok(MatchRecord::restore(
            row.id,
            row.player_name,
            duration_seconds,
            winner,
            row.played_at.and_utc(),
        ))
    }
}

/// Insertable match record row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::match_records)]
pub(crate) struct NewMatchRow {
    id: String,
    player_name: String,
    duration_seconds: i64,
    winner: String,
    played_at: NaiveDateTime,
}

impl TryFrom<&MatchRecord> for NewMatchRow {
    type Error = StorageError;

    fn try_from(record: &MatchRecord) -> Result<Self, Self::Error> {
        let duration_seconds = i64::try_from(*record.duration_seconds()).map_err(|_| {
            StorageError::malformed_record(
                record.id(),
                format!("duration {} does not fit", record.duration_seconds()),
            )
        })?;
        Ok(Self::new(
            record.id().clone(),
            record.name().clone(),
            duration_seconds,
            record.winner().to_string(),
            record.played_at().naive_utc(),
        ))
    }
}
