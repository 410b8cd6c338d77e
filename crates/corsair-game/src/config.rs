//! Configuration for a game session.

use corsair_story::InputPolicy;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Rewards offered on reaching the winning score or completing every level.
pub const DEFAULT_REWARDS: [&str; 6] = [
    "To be the king of Egypt",
    "To be the king of the world",
    "To be the Minister",
    "Win the world map",
    "Win the treasure chest",
    "Win the sword of power",
];

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible codes and rewards. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Score at or above which the session is won after a level.
    pub win_score: i64,
    /// Score at or below which the session is lost after a level.
    pub lose_score: i64,
    /// Player name; asked for at the prompt when unset.
    pub player_name: Option<String>,
    /// Rewards drawn at random on victory.
    pub rewards: Vec<String>,
    /// Closed-input handling for every prompt.
    pub input: InputPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            win_score: 200,
            lose_score: -100,
            player_name: None,
            rewards: DEFAULT_REWARDS.iter().map(|r| r.to_string()).collect(),
            input: InputPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the winning score.
    pub fn with_win_score(mut self, score: i64) -> Self {
        self.win_score = score;
        self
    }

    /// Set the losing score.
    pub fn with_lose_score(mut self, score: i64) -> Self {
        self.lose_score = score;
        self
    }

    /// Skip the name prompt.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Replace the reward list.
    pub fn with_rewards<I, S>(mut self, rewards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rewards = rewards.into_iter().map(Into::into).collect();
        self
    }

    /// Set the input policy.
    pub fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.input = policy;
        self
    }

    /// The session RNG.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
