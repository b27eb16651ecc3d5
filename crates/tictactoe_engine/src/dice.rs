//! Random sources for the AI opponent.
//!
//! The AI never touches a global generator: every draw goes through a
//! [`Dice`] handed to it, so tests can replace chance with a script.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws.
pub trait Dice {
    /// Uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn choose(&mut self, len: usize) -> usize;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }

    fn choose(&mut self, len: usize) -> usize {
        (**self).choose(len)
    }
}

/// [`Dice`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    /// Reproducible dice for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn choose(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// [`Dice`] that replays a fixed script.
///
/// Rolls are taken in order; once the script runs dry the last roll repeats
/// (or `0.0` if none were given). Choices are taken in order and reduced
/// modulo `len`; an exhausted choice script yields `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<f64>,
    choices: VecDeque<usize>,
    last_roll: f64,
}

impl ScriptedDice {
    /// Creates dice from scripted rolls and choices.
    pub fn new(
        rolls: impl IntoIterator<Item = f64>,
        choices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            choices: choices.into_iter().collect(),
            last_roll: 0.0,
        }
    }

    /// Dice that always roll `value` and always choose the first option.
    pub fn constant(value: f64) -> Self {
        Self::new([value], [])
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        if let Some(roll) = self.rolls.pop_front() {
            self.last_roll = roll;
        }
        self.last_roll
    }

    fn choose(&mut self, len: usize) -> usize {
        self.choices.pop_front().unwrap_or(0) % len.max(1)
    }
}
