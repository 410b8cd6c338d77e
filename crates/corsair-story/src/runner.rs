//! Drives a traversal through a console.

use corsair_core::{LevelId, LevelRegistry, PlayerProfile};
use rand::Rng;

use crate::console::{Console, InputPolicy, Style, ask_choice, ask_line, invalid_choice_notice};
use crate::engine::{Beat, Outcome, Traversal};
use crate::error::{StoryError, StoryResult};
use crate::graph::StoryGraph;

/// Prompt of the retry question after a death or a failed mission.
pub const RETRY_PROMPT: &str = "1) Yes 2) No\nPlay again? (1/2): ";

/// How a level ended for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEnd {
    /// The level was won and marked complete.
    Won,
    /// The player declined to retry after dying or failing.
    Abandoned,
}

/// Result of [`run_level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    /// The level that was played.
    pub level: LevelId,
    /// How it ended.
    pub end: LevelEnd,
    /// Attempts made, counting the last one.
    pub attempts: u32,
}

/// Play a level until it is won or the player stops retrying.
///
/// Each attempt shows the banner and intro and starts at the entry node.
/// Dying or failing offers a retry; accepting restores full health and
/// zeroes the score. Winning marks the level complete in `registry`.
pub fn run_level<C, R>(
    console: &mut C,
    graph: &StoryGraph,
    profile: &mut PlayerProfile,
    registry: &mut LevelRegistry,
    rng: &mut R,
    policy: &InputPolicy,
) -> StoryResult<LevelReport>
where
    C: Console + ?Sized,
    R: Rng + ?Sized,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        console.say(Style::Banner, &graph.banner());
        for paragraph in &graph.intro {
            console.say(Style::Narration, paragraph);
            console.pause();
        }

        let mut traversal = Traversal::new(graph, rng)?;
        let outcome = play_attempt(console, &mut traversal, profile, rng, policy)?;
        tracing::info!(level = %graph.level, attempts, ?outcome, score = profile.score(), "attempt finished");

        let notice = match outcome {
            Outcome::LevelWon => {
                registry.mark_complete(&graph.level)?;
                console.say(Style::Status, &profile.status().to_string());
                return Ok(LevelReport {
                    level: graph.level.clone(),
                    end: LevelEnd::Won,
                    attempts,
                });
            }
            Outcome::Died => "You are dead.",
            Outcome::MissionFailed => "Mission failed.",
        };
        console.say(Style::Loss, notice);
        console.say(Style::Status, &profile.status().to_string());

        if ask_choice(console, RETRY_PROMPT, &["1", "2"], policy)? == 0 {
            profile.restart_attempt();
        } else {
            return Ok(LevelReport {
                level: graph.level.clone(),
                end: LevelEnd::Abandoned,
                attempts,
            });
        }
    }
}

fn play_attempt<C, R>(
    console: &mut C,
    traversal: &mut Traversal<'_>,
    profile: &mut PlayerProfile,
    rng: &mut R,
    policy: &InputPolicy,
) -> StoryResult<Outcome>
where
    C: Console + ?Sized,
    R: Rng + ?Sized,
{
    loop {
        let prompt = traversal.prompt();
        for paragraph in &prompt.narration {
            console.say(Style::Narration, paragraph);
            console.pause();
        }
        if let Some(reveal) = &prompt.reveal {
            console.say(Style::Notice, reveal);
        }

        let line_prompt = prompt.render();
        let step = loop {
            let line = ask_line(console, &line_prompt, policy)?;
            match traversal.choose(&line, profile, rng) {
                Ok(step) => break step,
                Err(StoryError::InvalidChoice { expected, .. }) => {
                    console.say(Style::Notice, &invalid_choice_notice(&expected));
                }
                Err(e) => return Err(e),
            }
        };

        for beat in &step.beats {
            match beat {
                Beat::Narration(text) => console.say(Style::Narration, text),
                Beat::Score(change) => {
                    let style = if change.is_gain() { Style::Gain } else { Style::Loss };
                    console.say(style, &change.to_string());
                }
                Beat::Health(change) => {
                    let style = if change.delta >= 0 { Style::Gain } else { Style::Loss };
                    console.say(style, &change.to_string());
                }
            }
            console.pause();
        }

        if let Some(outcome) = step.outcome {
            return Ok(outcome);
        }
    }
}
