//! Game session management.
//!
//! The session is the only place that decides what happens between levels:
//! which level comes next, whether the score crossed a threshold, and
//! whether a replay resets the game.

use corsair_core::{LevelRegistry, PlayerName, PlayerProfile, ScoreRule};
use corsair_story::console::{ask_choice, ask_line};
use corsair_story::{Campaign, Console, LevelEnd, StoryError, Style, run_level};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};

const NAME_PROMPT: &str = "Enter your name: ";
const INVALID_NAME: &str = "Please enter a valid name (max 20 characters)";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// The score fell to the losing threshold and the player stopped.
    ScoreTooLow,
    /// The score reached the winning threshold and the player stopped.
    WinningScore,
    /// Every level was won and the player stopped.
    AllLevelsComplete,
    /// The player declined to retry a level without crossing a threshold.
    Abandoned,
    /// The input stream closed.
    InputClosed,
}

/// What happened in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Player name.
    pub player: String,
    /// Levels won, counting replays.
    pub levels_won: u32,
    /// Level attempts made.
    pub attempts: u32,
    /// Score when the session ended.
    pub final_score: i64,
    /// Highest score reached.
    pub high_score: i64,
    /// How the session ended.
    pub ending: Ending,
}

/// An interactive game session.
pub struct GameSession<'c, C: Console + ?Sized> {
    console: &'c mut C,
    campaign: Campaign,
    config: GameConfig,
    profile: PlayerProfile,
    registry: LevelRegistry,
    rng: StdRng,
    levels_won: u32,
    attempts: u32,
}

impl<'c, C: Console + ?Sized> GameSession<'c, C> {
    /// Set up a session: build the level registry, get the player's name,
    /// and greet the player.
    pub fn start(console: &'c mut C, campaign: Campaign, config: GameConfig) -> GameResult<Self> {
        let registry = campaign.registry()?;
        let name = match &config.player_name {
            Some(name) => PlayerName::parse(name)?,
            None => ask_name(console, &config)?,
        };
        console.say(Style::Banner, &format!("Welcome {name} to the game!"));
        tracing::info!(player = %name, levels = registry.levels().len(), "session started");

        let rng = config.rng();
        Ok(Self {
            console,
            campaign,
            config,
            profile: PlayerProfile::new(name),
            registry,
            rng,
            levels_won: 0,
            attempts: 0,
        })
    }

    /// The player profile.
    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// The level registry.
    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    /// Play until the player stops or the input closes.
    pub fn play(mut self) -> GameResult<SessionSummary> {
        let ending = match self.run() {
            Ok(ending) => ending,
            Err(GameError::Story(StoryError::InputClosed)) => Ending::InputClosed,
            Err(e) => return Err(e),
        };
        self.console.say(Style::Banner, "Thanks for playing!");

        let summary = SessionSummary {
            player: self.profile.name().to_string(),
            levels_won: self.levels_won,
            attempts: self.attempts,
            final_score: self.profile.score(),
            high_score: self.profile.high_score(),
            ending,
        };
        tracing::info!(?summary, "session ended");
        Ok(summary)
    }

    fn run(&mut self) -> GameResult<Ending> {
        loop {
            let Some(level) = self.registry.current_level().cloned() else {
                if self.full_victory()? {
                    continue;
                }
                return Ok(Ending::AllLevelsComplete);
            };

            self.console.say(
                Style::Notice,
                &format!("Starting {} level...", level.display_name),
            );
            let graph = self
                .campaign
                .graph(&level.id)
                .map_err(|_| GameError::LevelMissing(level.id.clone()))?;
            let report = run_level(
                &mut *self.console,
                graph,
                &mut self.profile,
                &mut self.registry,
                &mut self.rng,
                &self.config.input,
            )?;
            self.attempts += report.attempts;
            if report.end == LevelEnd::Won {
                self.levels_won += 1;
            }

            match self.threshold_reached() {
                Some(ending) => {
                    if !self.settle_threshold(ending)? {
                        return Ok(ending);
                    }
                    self.restart();
                }
                None if report.end == LevelEnd::Abandoned => return Ok(Ending::Abandoned),
                None => {}
            }
        }
    }

    /// The threshold the score has crossed, losing checked first.
    fn threshold_reached(&self) -> Option<Ending> {
        let score = self.profile.score();
        if score <= self.config.lose_score {
            Some(Ending::ScoreTooLow)
        } else if score >= self.config.win_score {
            Some(Ending::WinningScore)
        } else {
            None
        }
    }

    /// Announce a crossed threshold. Returns whether the player wants to
    /// start over.
    fn settle_threshold(&mut self, ending: Ending) -> GameResult<bool> {
        if ending == Ending::ScoreTooLow {
            self.console.say(Style::Loss, "Game Over! Your score is too low.");
            self.show_status();
            return self.ask_yes_no("Try again?");
        }
        self.console.say(
            Style::Gain,
            "Congratulations! You've achieved the winning score!",
        );
        self.show_status();
        if let Some(reward) = self.draw_reward() {
            self.console
                .say(Style::Gain, &format!("As a reward, you win: {reward}!"));
        }
        self.ask_yes_no("Play again?")
    }

    /// Every level is won. Returns whether the player wants to replay.
    fn full_victory(&mut self) -> GameResult<bool> {
        let change = self
            .profile
            .apply_score_delta(ScoreRule::WinGame.points(), "winning the game");
        self.console.say(Style::Gain, &change.to_string());
        self.console
            .say(Style::Banner, "Congratulations! You've completed all levels!");
        self.console.say(Style::Status, "Final Status:");
        self.show_status();
        if let Some(reward) = self.draw_reward() {
            self.console.say(
                Style::Gain,
                &format!("As a reward for completing all levels, you have won: {reward}!"),
            );
        }
        let again = self.ask_yes_no("Play again?")?;
        if again {
            self.restart();
        }
        Ok(again)
    }

    fn restart(&mut self) {
        tracing::info!(high_score = self.profile.high_score(), "game reset");
        self.profile.reset(&mut self.registry);
    }

    fn show_status(&mut self) {
        self.console
            .say(Style::Status, &self.profile.status().to_string());
    }

    fn draw_reward(&mut self) -> Option<String> {
        self.config.rewards.choose(&mut self.rng).cloned()
    }

    fn ask_yes_no(&mut self, question: &str) -> GameResult<bool> {
        let prompt = format!("1) Yes 2) No\n{question} (1/2): ");
        let index = ask_choice(&mut *self.console, &prompt, &["1", "2"], &self.config.input)?;
        Ok(index == 0)
    }
}

fn ask_name<C: Console + ?Sized>(console: &mut C, config: &GameConfig) -> GameResult<PlayerName> {
    loop {
        let line = ask_line(console, NAME_PROMPT, &config.input)?;
        match PlayerName::parse(&line) {
            Ok(name) => return Ok(name),
            Err(_) => console.say(Style::Notice, INVALID_NAME),
        }
    }
}
