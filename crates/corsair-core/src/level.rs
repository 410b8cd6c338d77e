use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Stable string key of a level, e.g. `death_island`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    /// Create a level ID from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One level of the campaign and whether the player has beaten it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Registry key, also the key of the level's story graph.
    pub id: LevelId,
    /// Name shown to the player.
    pub display_name: String,
    /// Set when the level is won; cleared only by a full reset.
    pub completed: bool,
}

impl Level {
    /// Create an incomplete level.
    pub fn new(id: impl Into<LevelId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            completed: false,
        }
    }
}

/// Ordered collection of levels. Order defines progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRegistry {
    levels: Vec<Level>,
}

impl LevelRegistry {
    /// Build a registry, rejecting an empty list and duplicate IDs.
    pub fn new(levels: Vec<Level>) -> CoreResult<Self> {
        if levels.is_empty() {
            return Err(CoreError::NoLevels);
        }
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].iter().any(|l| l.id == level.id) {
                return Err(CoreError::DuplicateLevel(level.id.clone()));
            }
        }
        Ok(Self { levels })
    }

    /// The first incomplete level in order, or `None` once every level is won.
    pub fn current_level(&self) -> Option<&Level> {
        self.levels.iter().find(|l| !l.completed)
    }

    /// Mark a level as won.
    pub fn mark_complete(&mut self, id: &LevelId) -> CoreResult<()> {
        let level = self
            .levels
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CoreError::UnknownLevel(id.clone()))?;
        level.completed = true;
        Ok(())
    }

    /// Whether every level has been won.
    pub fn all_complete(&self) -> bool {
        self.levels.iter().all(|l| l.completed)
    }

    /// Look up a level by ID.
    pub fn get(&self, id: &LevelId) -> Option<&Level> {
        self.levels.iter().find(|l| &l.id == id)
    }

    /// All levels in progression order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels won so far.
    pub fn completed_count(&self) -> usize {
        self.levels.iter().filter(|l| l.completed).count()
    }

    /// Clear every completion flag.
    pub fn reset(&mut self) {
        for level in &mut self.levels {
            level.completed = false;
        }
    }
}
