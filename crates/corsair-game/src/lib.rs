//! Session controller for Corsair.
//!
//! A [`GameSession`] owns the player profile, the level registry, and the
//! campaign. It asks for the player's name, plays levels in order through
//! the story engine, checks the score thresholds after each won level, and
//! handles full victory and replays.

pub mod config;
pub mod error;
pub mod session;

pub use config::{DEFAULT_REWARDS, GameConfig};
pub use error::{GameError, GameResult};
pub use session::{Ending, GameSession, SessionSummary};
