//! Client for the optional remote rating service.

use std::time::Duration;

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

use crate::MatchRecord;

/// Remote rating failure, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Network error: {} at {}:{}", message, file, line)]
pub struct NetworkError {
    /// Error message.
    pub message: String,
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl NetworkError {
    /// Creates a new network error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an error for a non-success HTTP status.
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(message)
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            ..Self::new(format!("Request failed: {}", err))
        }
    }
}

/// Shared rating service holding match records from every installation.
#[async_trait]
pub trait RatingService: Send + Sync {
    /// Downloads every known match record.
    async fn fetch(&self) -> Result<Vec<MatchRecord>, NetworkError>;

    /// Uploads one finished game.
    async fn submit(&self, record: &MatchRecord) -> Result<(), NetworkError>;
}

/// JSON-over-HTTP rating service: `GET url` lists records, `POST url`
/// adds one.
#[derive(Debug, Clone)]
pub struct HttpRatingService {
    url: String,
    client: reqwest::Client,
}

impl HttpRatingService {
    /// Creates a client for the service at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] if the HTTP client cannot be built.
    #[instrument(skip(url), fields(url = %url))]
    pub fn new(url: String, timeout: Duration) -> Result<Self, NetworkError> {
        info!("Creating HttpRatingService");
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    /// Returns the service URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RatingService for HttpRatingService {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<MatchRecord>, NetworkError> {
        debug!("Fetching remote ratings");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::with_status(
                status.as_u16(),
                format!("Rating fetch failed: HTTP {}", status),
            ));
        }

        let records: Vec<MatchRecord> = response.json().await?;
        info!(count = records.len(), "Remote ratings fetched");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(url = %self.url, id = %record.id()))]
    async fn submit(&self, record: &MatchRecord) -> Result<(), NetworkError> {
        debug!("Submitting record to rating service");
        let response = self.client.post(&self.url).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::with_status(
                status.as_u16(),
                format!("Rating submit failed: HTTP {}", status),
            ));
        }

        info!("Record submitted to rating service");
        Ok(())
    }
}
