//! The traversal state machine.
//!
//! [`Traversal`] walks one attempt of one level. It does no I/O: callers
//! show its [`Prompt`], feed the player's answer to [`Traversal::choose`],
//! and show the [`Beat`]s that come back.

use corsair_core::{HealthChange, PlayerProfile, ScoreChange};
use rand::Rng;

use crate::error::{StoryError, StoryResult};
use crate::graph::{Branch, CODE_PLACEHOLDER, Effect, NodeId, NodeInput, StoryGraph, StoryNode, Transition};

/// How an attempt at a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The level was won.
    LevelWon,
    /// The player died.
    Died,
    /// The mission failed.
    MissionFailed,
}

/// One observable event produced by a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Beat {
    /// The branch's response text.
    Narration(String),
    /// A score adjustment.
    Score(ScoreChange),
    /// A health adjustment.
    Health(HealthChange),
}

/// What a choice produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Events in the order they happened.
    pub beats: Vec<Beat>,
    /// Set when the choice ended the attempt.
    pub outcome: Option<Outcome>,
}

/// Everything needed to ask the player about the current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Paragraphs shown on entering the node.
    pub narration: Vec<String>,
    /// Code reveal text, with the code filled in.
    pub reveal: Option<String>,
    /// The question.
    pub question: String,
    /// Option texts in label order; empty for a code node.
    pub options: Vec<String>,
    /// Accepted labels; empty for a code node.
    pub labels: Vec<String>,
}

impl Prompt {
    /// The input line prompt, e.g. `1) North 2) South\nChoose a direction (1/2): `.
    pub fn render(&self) -> String {
        if self.labels.is_empty() {
            return format!("{}: ", self.question);
        }
        let options: Vec<String> = self
            .labels
            .iter()
            .zip(&self.options)
            .map(|(label, text)| format!("{label}) {text}"))
            .collect();
        format!(
            "{}\n{} ({}): ",
            options.join(" "),
            self.question,
            self.labels.join("/")
        )
    }
}

/// Where a branch leads.
enum Next<'g> {
    Enter(&'g NodeId, &'g StoryNode),
    End(Outcome),
}

/// One attempt at one level.
#[derive(Debug)]
pub struct Traversal<'g> {
    graph: &'g StoryGraph,
    node_id: NodeId,
    node: &'g StoryNode,
    code: Option<String>,
    outcome: Option<Outcome>,
}

impl<'g> Traversal<'g> {
    /// Start at the graph's entry node.
    pub fn new<R: Rng + ?Sized>(graph: &'g StoryGraph, rng: &mut R) -> StoryResult<Self> {
        let node = graph.node(&graph.entry)?;
        let mut traversal = Self {
            graph,
            node_id: graph.entry.clone(),
            node,
            code: None,
            outcome: None,
        };
        traversal.enter(graph.entry.clone(), node, rng);
        Ok(traversal)
    }

    /// The graph being walked.
    pub fn graph(&self) -> &'g StoryGraph {
        self.graph
    }

    /// ID of the current node.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// The code generated for the current code node.
    pub fn pending_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The terminal outcome, once reached.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The prompt for the current node.
    pub fn prompt(&self) -> Prompt {
        let reveal = match (&self.node.input, &self.code) {
            (NodeInput::Code { reveal, .. }, Some(code)) => {
                Some(reveal.replace(CODE_PLACEHOLDER, code))
            }
            _ => None,
        };
        Prompt {
            narration: self.node.narration.clone(),
            reveal,
            question: self.node.question.clone(),
            options: self.node.options().iter().map(|o| o.text.clone()).collect(),
            labels: self.node.labels(),
        }
    }

    /// Answer the current node.
    ///
    /// Invalid input fails with [`StoryError::InvalidChoice`] and changes
    /// nothing. Otherwise the branch's effects are applied to `profile` in
    /// order and its transition is followed. Health at zero after
    /// the effects ends the attempt in [`Outcome::Died`] regardless of the
    /// transition.
    pub fn choose<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        profile: &mut PlayerProfile,
        rng: &mut R,
    ) -> StoryResult<Step> {
        if self.outcome.is_some() {
            return Err(StoryError::TraversalFinished);
        }
        let graph = self.graph;
        let branch = self.resolve(input.trim())?;

        // Resolve the target before touching the profile.
        let next = match &branch.next {
            Transition::Goto(id) => Next::Enter(id, graph.node(id)?),
            Transition::Win => Next::End(Outcome::LevelWon),
            Transition::Die => Next::End(Outcome::Died),
            Transition::Fail => Next::End(Outcome::MissionFailed),
        };

        let mut beats = Vec::new();
        if !branch.response.is_empty() {
            beats.push(Beat::Narration(branch.response.clone()));
        }
        for effect in &branch.effects {
            beats.push(match effect {
                Effect::Score { rule, reason } => {
                    Beat::Score(profile.apply_score_delta(rule.points(), reason))
                }
                Effect::Health(delta) => Beat::Health(profile.apply_health_delta(*delta)),
            });
        }

        let outcome = match next {
            _ if profile.is_dead() => Some(Outcome::Died),
            Next::End(outcome) => Some(outcome),
            Next::Enter(id, node) => {
                self.enter(id.clone(), node, rng);
                None
            }
        };

        if let Some(outcome) = outcome {
            tracing::debug!(level = %graph.level, node = %self.node_id, ?outcome, "attempt ended");
            self.outcome = Some(outcome);
        }
        Ok(Step { beats, outcome })
    }

    fn resolve(&self, input: &str) -> StoryResult<&'g Branch> {
        let node = self.node;
        match &node.input {
            NodeInput::Choice { options } => {
                let labels = node.labels();
                labels
                    .iter()
                    .position(|label| label == input)
                    .map(|i| &options[i].branch)
                    .ok_or_else(|| StoryError::InvalidChoice {
                        input: input.to_string(),
                        expected: labels,
                    })
            }
            NodeInput::Code {
                on_match,
                on_mismatch,
                ..
            } => {
                if self.code.as_deref() == Some(input) {
                    Ok(on_match)
                } else {
                    Ok(on_mismatch)
                }
            }
        }
    }

    fn enter<R: Rng + ?Sized>(&mut self, id: NodeId, node: &'g StoryNode, rng: &mut R) {
        self.code = match node.input {
            NodeInput::Code { .. } => Some(rng.random_range(1000..=9999).to_string()),
            NodeInput::Choice { .. } => None,
        };
        tracing::debug!(level = %self.graph.level, node = %id, "entered node");
        self.node_id = id;
        self.node = node;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corsair_core::{PlayerName, ScoreRule};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::graph::StoryOption;

    fn profile() -> PlayerProfile {
        PlayerProfile::new(PlayerName::parse("Hatshepsut").unwrap())
    }

    fn graph() -> StoryGraph {
        StoryGraph::new("test_sea", "Test Sea", "sail")
            .with_node(
                "sail",
                StoryNode::choice("Choose a direction")
                    .with_narration("You are on a ship.")
                    .with_option(
                        StoryOption::new("North", Transition::Die)
                            .with_response("A storm breaks the ship!")
                            .with_effect(Effect::Health(-100))
                            .with_effect(Effect::score(ScoreRule::Death, "dying in the storm")),
                    )
                    .with_option(
                        StoryOption::new("South", Transition::goto("chest"))
                            .with_effect(Effect::score(ScoreRule::KillEnemy, "defeating the snake")),
                    )
                    .with_option(
                        StoryOption::new("Home", Transition::Fail)
                            .with_effect(Effect::score(ScoreRule::MissionFail, "failing the mission")),
                    )
                    .with_option(
                        // Declares a goto but the damage is fatal.
                        StoryOption::new("Reef", Transition::goto("chest"))
                            .with_effect(Effect::Health(-150)),
                    ),
            )
            .with_node(
                "chest",
                StoryNode::code(
                    "Enter the code",
                    "The map shows {code}.",
                    Branch::new(Transition::Win)
                        .with_effect(Effect::score(ScoreRule::CompleteLevel, "completing the level")),
                    Branch::new(Transition::Die)
                        .with_response("The chest explodes.")
                        .with_effect(Effect::Health(-100)),
                ),
            )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn prompt_renders_options() {
        let graph = graph();
        let traversal = Traversal::new(&graph, &mut rng()).unwrap();
        let prompt = traversal.prompt();
        assert_eq!(prompt.narration, vec!["You are on a ship."]);
        assert_eq!(
            prompt.render(),
            "1) North 2) South 3) Home 4) Reef\nChoose a direction (1/2/3/4): "
        );
    }

    #[test]
    fn invalid_choice_changes_nothing() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let mut player = profile();

        for input in ["", "5", "0", "north", "1 2"] {
            let err = traversal.choose(input, &mut player, &mut rng).unwrap_err();
            assert!(matches!(err, StoryError::InvalidChoice { .. }), "{input:?}");
        }
        assert_eq!(player.health(), 100);
        assert_eq!(player.score(), 0);
        assert_eq!(traversal.node_id().as_str(), "sail");
    }

    #[test]
    fn input_is_trimmed() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let step = traversal.choose(" 2\n", &mut profile(), &mut rng).unwrap();
        assert_eq!(step.outcome, None);
        assert_eq!(traversal.node_id().as_str(), "chest");
    }

    #[test]
    fn death_branch() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let mut player = profile();

        let step = traversal.choose("1", &mut player, &mut rng).unwrap();
        assert_eq!(step.outcome, Some(Outcome::Died));
        assert_eq!(step.beats.len(), 3);
        assert_eq!(
            step.beats[0],
            Beat::Narration("A storm breaks the ship!".to_string())
        );
        assert_eq!(player.health(), 0);
        assert_eq!(player.score(), -50);

        let err = traversal.choose("1", &mut player, &mut rng).unwrap_err();
        assert!(matches!(err, StoryError::TraversalFinished));
    }

    #[test]
    fn mission_failure_keeps_health() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let mut player = profile();

        let step = traversal.choose("3", &mut player, &mut rng).unwrap();
        assert_eq!(step.outcome, Some(Outcome::MissionFailed));
        assert_eq!(player.health(), 100);
        assert_eq!(player.score(), -30);
    }

    #[test]
    fn fatal_damage_overrides_goto() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let step = traversal.choose("4", &mut profile(), &mut rng).unwrap();
        assert_eq!(step.outcome, Some(Outcome::Died));
        assert_eq!(traversal.outcome(), Some(Outcome::Died));
    }

    #[test]
    fn code_node_matches_generated_code() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let mut player = profile();
        traversal.choose("2", &mut player, &mut rng).unwrap();

        let code = traversal.pending_code().unwrap().to_string();
        let value: u32 = code.parse().unwrap();
        assert!((1000..=9999).contains(&value));

        let prompt = traversal.prompt();
        assert_eq!(prompt.reveal, Some(format!("The map shows {code}.")));
        assert_eq!(prompt.render(), "Enter the code: ");

        let step = traversal.choose(&code, &mut player, &mut rng).unwrap();
        assert_eq!(step.outcome, Some(Outcome::LevelWon));
        assert_eq!(player.score(), 70);
    }

    #[test]
    fn wrong_code_always_mismatches() {
        let graph = graph();
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let mut player = profile();
        traversal.choose("2", &mut player, &mut rng).unwrap();

        let step = traversal.choose("not a code", &mut player, &mut rng).unwrap();
        assert_eq!(step.outcome, Some(Outcome::Died));
        assert!(player.is_dead());
    }

    #[test]
    fn dangling_goto_fails_before_effects() {
        let graph = StoryGraph::new("broken", "Broken", "start").with_node(
            "start",
            StoryNode::choice("Go?").with_option(
                StoryOption::new("Yes", Transition::goto("missing"))
                    .with_effect(Effect::score(ScoreRule::KillEnemy, "winning")),
            ),
        );
        let mut rng = rng();
        let mut traversal = Traversal::new(&graph, &mut rng).unwrap();
        let mut player = profile();
        let err = traversal.choose("1", &mut player, &mut rng).unwrap_err();
        assert!(matches!(err, StoryError::UnknownNode { .. }));
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn missing_entry_is_an_error() {
        let graph = StoryGraph::new("empty", "Empty", "start");
        assert!(Traversal::new(&graph, &mut rng()).is_err());
    }
}
