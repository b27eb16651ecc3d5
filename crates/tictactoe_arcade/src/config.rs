//! Arcade configuration loaded from TOML.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tictactoe_engine::Difficulty;
use tracing::{debug, info, instrument};

use crate::GUEST_NAME;

/// Settings for the arcade binary.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// Path of the SQLite database holding match records.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// AI difficulty for new games.
    #[serde(default)]
    difficulty: Difficulty,

    /// Player name stored with finished games.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// Remote rating service URL; remote features are off when absent.
    #[serde(default)]
    rating_url: Option<String>,

    /// Timeout for rating service requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

#[instrument]
fn default_db_path() -> String {
    "tictactoe.db".to_string()
}

#[instrument]
fn default_player_name() -> String {
    GUEST_NAME.to_string()
}

#[instrument]
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            difficulty: Difficulty::default(),
            player_name: default_player_name(),
            rating_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ArcadeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            db_path = %config.db_path,
            difficulty = %config.difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads configuration from a file, using defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Rating request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Overrides the database path.
    pub fn set_db_path(&mut self, db_path: String) {
        self.db_path = db_path;
    }

    /// Overrides the difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Overrides the player name.
    pub fn set_player_name(&mut self, player_name: String) {
        self.player_name = player_name;
    }

    /// Overrides the rating service URL.
    pub fn set_rating_url(&mut self, rating_url: Option<String>) {
        self.rating_url = rating_url;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
