//! The campaign: every level's story graph, in progression order.

use corsair_core::{Level, LevelId, LevelRegistry};
use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::graph::StoryGraph;
use crate::validate::validate_graphs;

const BUILTIN_LEVELS: [&str; 4] = [
    include_str!("../content/death_island.json"),
    include_str!("../content/ghost_ship.json"),
    include_str!("../content/bermuda_triangle.json"),
    include_str!("../content/land_of_pirates.json"),
];

/// An ordered, validated set of story graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CampaignFile")]
pub struct Campaign {
    levels: Vec<StoryGraph>,
}

#[derive(Deserialize)]
struct CampaignFile {
    levels: Vec<StoryGraph>,
}

impl TryFrom<CampaignFile> for Campaign {
    type Error = StoryError;

    fn try_from(file: CampaignFile) -> StoryResult<Self> {
        Self::from_graphs(file.levels)
    }
}

impl Campaign {
    /// The four levels shipped with the game.
    pub fn builtin() -> StoryResult<Self> {
        let levels = BUILTIN_LEVELS
            .iter()
            .map(|json| serde_json::from_str(json))
            .collect::<Result<Vec<StoryGraph>, _>>()?;
        Self::from_graphs(levels)
    }

    /// Build a campaign, checking every graph and the level list.
    pub fn from_graphs(levels: Vec<StoryGraph>) -> StoryResult<Self> {
        let campaign = Self { levels };
        // Rejects an empty list and duplicate level IDs.
        campaign.registry()?;
        validate_graphs(&campaign.levels)?;
        Ok(campaign)
    }

    /// Parse a campaign file: `{ "levels": [ ... ] }`.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        let file: CampaignFile = serde_json::from_str(json)?;
        Self::from_graphs(file.levels)
    }

    /// Serialize back to the campaign file format.
    pub fn to_json(&self) -> StoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A fresh registry with every level incomplete.
    pub fn registry(&self) -> StoryResult<LevelRegistry> {
        let levels = self
            .levels
            .iter()
            .map(|g| Level::new(g.level.clone(), g.title.clone()))
            .collect();
        Ok(LevelRegistry::new(levels)?)
    }

    /// The story graph of a level.
    pub fn graph(&self, id: &LevelId) -> StoryResult<&StoryGraph> {
        self.levels
            .iter()
            .find(|g| &g.level == id)
            .ok_or_else(|| StoryError::MissingStory(id.clone()))
    }

    /// All graphs in progression order.
    pub fn levels(&self) -> &[StoryGraph] {
        &self.levels
    }
}
