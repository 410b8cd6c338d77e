use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::level::LevelRegistry;
use crate::score::{HealthChange, ScoreChange};

/// Health at the start of a game and of every retry.
pub const STARTING_HEALTH: i32 = 100;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// A validated player name: 1-20 printable characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Validate a name. Surrounding whitespace is trimmed first.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let name = input.trim();
        let invalid = |reason| CoreError::InvalidName {
            name: input.to_string(),
            reason,
        };
        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(invalid("name is longer than 20 characters"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name contains unprintable characters"));
        }
        Ok(Self(name.to_string()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

/// The player's health and score for the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    name: PlayerName,
    health: i32,
    score: i64,
    high_score: i64,
}

impl PlayerProfile {
    /// A fresh profile with full health and no score.
    pub fn new(name: PlayerName) -> Self {
        Self {
            name,
            health: STARTING_HEALTH,
            score: 0,
            high_score: 0,
        }
    }

    /// The player's name.
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    /// Current health, never below zero. Zero means the player is dead.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Current score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Highest score reached this process run.
    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    /// Whether health has dropped to zero.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Add `points` to the score and raise the high score if it was beaten.
    pub fn apply_score_delta(&mut self, points: i64, reason: &str) -> ScoreChange {
        self.score += points;
        let new_high = self.score > self.high_score;
        if new_high {
            self.high_score = self.score;
        }
        ScoreChange {
            points,
            reason: reason.to_string(),
            score: self.score,
            new_high,
        }
    }

    /// Add `points` to health, stopping at zero. The caller treats zero
    /// health as death.
    pub fn apply_health_delta(&mut self, points: i32) -> HealthChange {
        self.health = self.health.saturating_add(points).max(0);
        HealthChange {
            delta: points,
            health: self.health,
        }
    }

    /// Start a level over: full health and a zeroed score.
    ///
    /// Completion flags and the high score are kept.
    pub fn restart_attempt(&mut self) {
        self.health = STARTING_HEALTH;
        self.score = 0;
    }

    /// Full game reset: full health, zeroed score, every level incomplete.
    ///
    /// The high score survives.
    pub fn reset(&mut self, levels: &mut LevelRegistry) {
        self.restart_attempt();
        levels.reset();
    }

    /// Snapshot of the status lines.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            name: self.name.to_string(),
            health: self.health,
            score: self.score,
            high_score: self.high_score,
        }
    }
}

/// The four status lines shown after level events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Player name.
    pub name: String,
    /// Player health.
    pub health: i32,
    /// Current score.
    pub score: i64,
    /// High score.
    pub high_score: i64,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player Name: {}", self.name)?;
        writeln!(f, "Player Health: {}", self.health)?;
        writeln!(f, "Current Score: {}", self.score)?;
        write!(f, "High Score: {}", self.high_score)
    }
}
