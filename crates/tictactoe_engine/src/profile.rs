//! Difficulty presets for the AI opponent.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ProfileError;

/// Parameters steering the AI between random and tactical play.
///
/// `randomness` is the chance of an unconditioned random move.
/// `tactical_thinking` is the chance, when not playing randomly, of looking
/// for a winning or blocking cell before falling back to position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    randomness: f64,
    tactical_thinking: f64,
}

impl AiProfile {
    /// Never random, always tactical.
    pub const HARD: Self = Self {
        randomness: 0.0,
        tactical_thinking: 1.0,
    };
    /// Mostly tactical with an occasional slip.
    pub const MEDIUM: Self = Self {
        randomness: 0.15,
        tactical_thinking: 0.8,
    };
    /// A coin flip on tactics.
    pub const EASY: Self = Self {
        randomness: 0.35,
        tactical_thinking: 0.5,
    };
    /// Mostly random.
    pub const STUPID: Self = Self {
        randomness: 0.75,
        tactical_thinking: 0.2,
    };

    /// Creates a custom profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] if either probability is outside `[0, 1]`
    /// or not a number.
    #[instrument]
    pub fn new(randomness: f64, tactical_thinking: f64) -> Result<Self, ProfileError> {
        for (name, value) in [
            ("randomness", randomness),
            ("tactical_thinking", tactical_thinking),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ProfileError::new(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            randomness,
            tactical_thinking,
        })
    }

    /// Probability of an unconditioned random move.
    pub fn randomness(&self) -> f64 {
        self.randomness
    }

    /// Probability of trying win/block logic.
    pub fn tactical_thinking(&self) -> f64 {
        self.tactical_thinking
    }
}

impl Default for AiProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

/// Named difficulty, as chosen in configuration or on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// [`AiProfile::HARD`].
    Hard,
    /// [`AiProfile::MEDIUM`].
    #[default]
    Medium,
    /// [`AiProfile::EASY`].
    Easy,
    /// [`AiProfile::STUPID`].
    Stupid,
}

impl Difficulty {
    /// Returns the preset profile for this difficulty.
    pub fn profile(self) -> AiProfile {
        match self {
            Self::Hard => AiProfile::HARD,
            Self::Medium => AiProfile::MEDIUM,
            Self::Easy => AiProfile::EASY,
            Self::Stupid => AiProfile::STUPID,
        }
    }
}

impl From<Difficulty> for AiProfile {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.profile()
    }
}
