//! Score keeping

use crate::events::Choice;
use serde::{Deserialize, Serialize};

/// How the score reacts to going below zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// The score never drops below zero
    #[default]
    ClampedAtZero,
    /// The score may go negative
    Unclamped,
}

/// Score parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub initial: i32,
    pub good_delta: i32,
    pub bad_delta: i32,
    pub policy: ScorePolicy,
    /// Score at which the progress bar is full
    pub progress_max: i32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            initial: 750,
            good_delta: 500,
            bad_delta: -200,
            policy: ScorePolicy::ClampedAtZero,
            progress_max: 2000,
        }
    }
}

/// Running score
#[derive(Clone, Debug)]
pub struct Score {
    value: i32,
    rules: ScoreRules,
}

impl Score {
    pub fn new(rules: ScoreRules) -> Self {
        let mut score = Self { value: 0, rules };
        score.value = score.bounded(i64::from(rules.initial));
        score
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    /// Apply the delta for a choice, returning the change actually applied
    pub fn apply(&mut self, choice: Choice) -> i32 {
        let delta = match choice {
            Choice::Good => self.rules.good_delta,
            Choice::Bad => self.rules.bad_delta,
        };
        self.add(delta)
    }

    /// Add a raw delta, returning the change actually applied
    pub fn add(&mut self, delta: i32) -> i32 {
        let before = self.value;
        self.value = self.bounded(i64::from(before) + i64::from(delta));
        self.value - before
    }

    /// Fraction of the progress bar filled, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.rules.progress_max <= 0 {
            return 1.0;
        }
        (self.value as f32 / self.rules.progress_max as f32).clamp(0.0, 1.0)
    }

    fn bounded(&self, value: i64) -> i32 {
        let floor = match self.rules.policy {
            ScorePolicy::ClampedAtZero => 0,
            ScorePolicy::Unclamped => i64::from(i32::MIN),
        };
        value.clamp(floor, i64::from(i32::MAX)) as i32
    }
}
