//! Core types for Corsair: the player profile, the level registry, and the
//! score table.
//!
//! Nothing in this crate performs I/O. Status lines are returned as values
//! (see [`ScoreChange`] and [`StatusReport`]) so a caller decides how and
//! where to show them.

/// Error types used throughout the crate.
pub mod error;
/// Level identifiers and the ordered level registry.
pub mod level;
/// Player name validation and the player profile.
pub mod profile;
/// The score table and score/health change records.
pub mod score;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export level types.
pub use level::{Level, LevelId, LevelRegistry};
/// Re-export profile types.
pub use profile::{PlayerName, PlayerProfile, StatusReport};
/// Re-export score types.
pub use score::{HealthChange, ScoreChange, ScoreRule};
