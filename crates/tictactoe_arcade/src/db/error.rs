//! Errors raised by match record stores.

use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// A match record could not be written or read back.
///
/// Carries the offending record id when the failure concerns one stored
/// row, and the source location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Match store error: {} at {}:{}", message, file, line)]
pub struct StorageError {
    /// What went wrong.
    pub message: String,
    /// Id of the record involved, if a single record was at fault.
    pub record_id: Option<String>,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a store-wide error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            record_id: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// A stored row that does not describe a valid match record.
    #[track_caller]
    pub fn malformed_record(record_id: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        warn!(record_id, detail = %detail, "Malformed match record");
        Self {
            record_id: Some(record_id.to_string()),
            ..Self::new(format!("Record '{}' is malformed: {}", record_id, detail))
        }
    }
}

impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Match record query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Could not open the match database: {}", err))
    }
}
