//! Error types for game sessions.

use corsair_core::{CoreError, LevelId};
use corsair_story::StoryError;
use thiserror::Error;

/// Result type for session operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can end a session abnormally.
#[derive(Debug, Error)]
pub enum GameError {
    /// Story engine error.
    #[error(transparent)]
    Story(#[from] StoryError),

    /// Profile or registry error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The registry names a level the campaign has no story for.
    #[error("level {0} has no story in this campaign")]
    LevelMissing(LevelId),
}

impl GameError {
    /// Whether the error only means the input stream closed.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, Self::Story(StoryError::InputClosed))
    }
}
