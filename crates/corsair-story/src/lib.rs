//! Story engine for Corsair.
//!
//! Levels are directed graphs of [`StoryNode`]s stored as data. A single
//! interpreter, [`Traversal`], walks any graph: it validates a choice,
//! applies the chosen branch's effects to the player profile, and follows
//! the branch's transition until a terminal [`Outcome`]. [`run_level`]
//! drives a traversal through a [`Console`], which keeps the engine free of
//! terminal I/O.

/// The campaign: every level's story graph, in order.
pub mod campaign;
/// Console abstraction and validated prompting.
pub mod console;
/// The pure traversal state machine.
pub mod engine;
/// Error types for the story engine.
pub mod error;
/// Story graph data model.
pub mod graph;
/// Drives a traversal through a console, including the retry prompt.
pub mod runner;
/// Structural checks on story graphs.
pub mod validate;

pub use campaign::Campaign;
pub use console::{Console, Input, InputPolicy, ScriptedConsole, Style};
pub use engine::{Beat, Outcome, Prompt, Step, Traversal};
pub use error::{StoryError, StoryResult};
pub use graph::{Branch, Effect, NodeId, NodeInput, StoryGraph, StoryNode, StoryOption, Transition};
pub use runner::{LevelEnd, LevelReport, run_level};
