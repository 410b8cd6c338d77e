//! Error types for the story engine.

use corsair_core::{CoreError, LevelId};
use thiserror::Error;

use crate::graph::NodeId;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading or traversing a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The input is not one of the node's labels.
    #[error("invalid choice {input:?}, expected one of: {}", .expected.join(", "))]
    InvalidChoice {
        /// What the player typed.
        input: String,
        /// The accepted labels.
        expected: Vec<String>,
    },

    /// A transition points at a node the graph does not contain.
    #[error("level {level} has no node named {node}")]
    UnknownNode {
        /// Level whose graph was searched.
        level: LevelId,
        /// Missing node.
        node: NodeId,
    },

    /// A campaign has no graph for a registered level.
    #[error("no story for level {0}")]
    MissingStory(LevelId),

    /// The story content breaks a structural rule.
    #[error("invalid story: {0}")]
    Validation(String),

    /// Story JSON could not be parsed.
    #[error("failed to parse story: {0}")]
    Parse(#[from] serde_json::Error),

    /// A choice was made after the traversal reached its outcome.
    #[error("traversal already finished")]
    TraversalFinished,

    /// The input stream stayed closed for too many consecutive reads.
    #[error("input stream closed")]
    InputClosed,

    /// Profile or registry error.
    #[error(transparent)]
    Core(#[from] CoreError),
}
