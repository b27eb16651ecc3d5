//! Database repository for match records.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::{MatchRow, NewMatchRow};
use crate::db::{StorageError, schema};
use crate::{MatchRecord, RecordStore};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite-backed record store.
///
/// Opens a fresh connection per operation, so one repository can be shared
/// freely between threads.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    db_path: String,
}

impl MatchRepository {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StorageError> {
        info!(path = %db_path, "Opening MatchRepository");
        let repository = Self { db_path };
        repository.run_migrations()?;
        Ok(repository)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StorageError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }

    #[instrument(skip(self))]
    fn run_migrations(&self) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Gets all records for one player, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs or a stored row
    /// is malformed.
    #[instrument(skip(self))]
    pub fn fetch_by_player(&self, player_name: &str) -> Result<Vec<MatchRecord>, StorageError> {
        debug!(player_name, "Loading player records");
        let mut conn = self.connection()?;

        let rows: Vec<MatchRow> = schema::match_records::table
            .filter(schema::match_records::player_name.eq(player_name))
            .order(schema::match_records::seq.asc())
            .select(MatchRow::as_select())
            .load(&mut conn)?;

        let records = rows
            .into_iter()
            .map(MatchRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        info!(player_name, count = records.len(), "Player records loaded");
        Ok(records)
    }
}

impl RecordStore for MatchRepository {
    #[instrument(skip(self, record), fields(id = %record.id(), winner = %record.winner()))]
    fn save(&self, record: &MatchRecord) -> Result<(), StorageError> {
        debug!("Saving match record");
        let row = NewMatchRow::try_from(record)?;
        let mut conn = self.connection()?;

        diesel::insert_into(schema::match_records::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(
            id = %record.id(),
            player = %record.name(),
            duration = record.duration_seconds(),
            "Match record saved"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        debug!("Loading all match records");
        let mut conn = self.connection()?;

        let rows: Vec<MatchRow> = schema::match_records::table
            .order(schema::match_records::seq.asc())
            .select(MatchRow::as_select())
            .load(&mut conn)?;

        let records = rows
            .into_iter()
            .map(MatchRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = records.len(), "Match records loaded");
        Ok(records)
    }
}
