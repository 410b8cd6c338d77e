use crate::level::LevelId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the profile and level registry.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The level ID is not part of the registry.
    #[error("unknown level: {0}")]
    UnknownLevel(LevelId),

    /// Two levels share the same ID.
    #[error("level already registered: {0}")]
    DuplicateLevel(LevelId),

    /// A registry must hold at least one level.
    #[error("a level registry needs at least one level")]
    NoLevels,

    /// The player name is empty, too long, or not printable.
    #[error("invalid player name {name:?}: {reason}")]
    InvalidName {
        /// The rejected input.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
