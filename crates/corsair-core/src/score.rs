use std::fmt;

use serde::{Deserialize, Serialize};

/// The score table. Story content names a rule instead of a raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// Accepting a mission.
    MissionAccept,
    /// Defeating an enemy.
    KillEnemy,
    /// Finding a treasure.
    FindTreasure,
    /// Winning a level.
    CompleteLevel,
    /// Winning every level of the campaign.
    WinGame,
    /// Dying.
    Death,
    /// Failing or refusing the mission.
    MissionFail,
    /// A choice that is wrong but not fatal.
    WrongChoice,
}

impl ScoreRule {
    /// Points awarded (positive) or deducted (negative) by this rule.
    pub fn points(self) -> i64 {
        match self {
            Self::MissionAccept => 10,
            Self::KillEnemy => 20,
            Self::FindTreasure => 30,
            Self::CompleteLevel => 50,
            Self::WinGame => 100,
            Self::Death => -50,
            Self::MissionFail => -30,
            Self::WrongChoice => -10,
        }
    }
}

/// Record of one score adjustment.
///
/// Displays as the status line shown to the player, e.g.
/// `Gained 20 points for defeating the giant snake!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreChange {
    /// Points added; negative for a penalty.
    pub points: i64,
    /// Why the points changed.
    pub reason: String,
    /// Score after the change.
    pub score: i64,
    /// Whether this change set a new high score.
    pub new_high: bool,
}

impl ScoreChange {
    /// Whether the change added points.
    pub fn is_gain(&self) -> bool {
        self.points > 0
    }
}

impl fmt::Display for ScoreChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.is_gain() { "Gained" } else { "Lost" };
        write!(f, "{verb} {} points", self.points.unsigned_abs())?;
        let reason = self.reason.trim();
        if !reason.is_empty() {
            write!(f, " for {}", reason.replace('_', " ").to_lowercase())?;
        }
        f.write_str("!")
    }
}

/// Record of one health adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChange {
    /// Health added; negative for damage.
    pub delta: i32,
    /// Health after the change.
    pub health: i32,
}

impl HealthChange {
    /// Whether this change left the player without health.
    pub fn is_fatal(&self) -> bool {
        self.health <= 0
    }
}

impl fmt::Display for HealthChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.delta >= 0 {
            write!(f, "Recovered {} health.", self.delta)
        } else {
            write!(f, "Lost {} health.", self.delta.unsigned_abs())
        }
    }
}
