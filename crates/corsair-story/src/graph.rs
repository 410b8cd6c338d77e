//! Story graphs: nodes, options, effects, and transitions.
//!
//! Every decision point of a level is a [`StoryNode`]. A node either offers
//! numbered options or asks for a code; each answer leads to a [`Branch`]
//! that prints a response, applies [`Effect`]s, and follows a
//! [`Transition`].

use std::collections::BTreeMap;
use std::fmt;

use corsair_core::{LevelId, ScoreRule};
use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// Most options a choice node may offer, so every label is one digit.
pub const MAX_OPTIONS: usize = 9;

/// Placeholder replaced by the generated code in a code node's reveal text.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Key of a node within one graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A change applied to the player when a branch is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Adjust the score by a rule from the score table.
    Score {
        /// Which row of the score table applies.
        rule: ScoreRule,
        /// Human-readable reason, shown in the status line.
        reason: String,
    },
    /// Adjust health. Health at or below zero ends the attempt in death.
    Health(i32),
}

impl Effect {
    /// Shorthand for a score effect.
    pub fn score(rule: ScoreRule, reason: impl Into<String>) -> Self {
        Self::Score {
            rule,
            reason: reason.into(),
        }
    }
}

/// Where a branch leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Continue at another node of the same graph.
    Goto(NodeId),
    /// The level is won.
    Win,
    /// The player dies.
    Die,
    /// The mission fails.
    Fail,
}

impl Transition {
    /// Shorthand for [`Transition::Goto`].
    pub fn goto(node: impl Into<String>) -> Self {
        Self::Goto(NodeId::new(node))
    }

    /// Whether this transition ends the traversal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Goto(_))
    }
}

/// Response text, effects, and transition of one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Text shown right after the answer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response: String,
    /// Effects applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    /// Where the story goes next.
    pub next: Transition,
}

impl Branch {
    /// A branch with no response and no effects.
    pub fn new(next: Transition) -> Self {
        Self {
            response: String::new(),
            effects: Vec::new(),
            next,
        }
    }

    /// Set the response text.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A numbered option of a choice node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOption {
    /// Text shown next to the option's number.
    pub text: String,
    /// What happens when the option is picked.
    #[serde(flatten)]
    pub branch: Branch,
}

impl StoryOption {
    /// Create an option leading to `next`.
    pub fn new(text: impl Into<String>, next: Transition) -> Self {
        Self {
            text: text.into(),
            branch: Branch::new(next),
        }
    }

    /// Set the response text.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.branch = self.branch.with_response(response);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.branch = self.branch.with_effect(effect);
        self
    }
}

/// How a node reads the player's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeInput {
    /// Numbered options, answered with "1", "2", ...
    Choice {
        /// Options in display order.
        options: Vec<StoryOption>,
    },
    /// A random four-digit code is revealed on entry and must be typed back.
    Code {
        /// Text revealing the code; contains [`CODE_PLACEHOLDER`].
        reveal: String,
        /// Taken when the input equals the code.
        on_match: Branch,
        /// Taken on any other input.
        on_mismatch: Branch,
    },
}

/// One decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    /// Paragraphs shown when the node is entered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub narration: Vec<String>,
    /// The question asked at the prompt.
    pub question: String,
    /// How the answer is read.
    pub input: NodeInput,
}

impl StoryNode {
    /// A choice node with no options yet.
    pub fn choice(question: impl Into<String>) -> Self {
        Self {
            narration: Vec::new(),
            question: question.into(),
            input: NodeInput::Choice {
                options: Vec::new(),
            },
        }
    }

    /// A code node.
    pub fn code(
        question: impl Into<String>,
        reveal: impl Into<String>,
        on_match: Branch,
        on_mismatch: Branch,
    ) -> Self {
        Self {
            narration: Vec::new(),
            question: question.into(),
            input: NodeInput::Code {
                reveal: reveal.into(),
                on_match,
                on_mismatch,
            },
        }
    }

    /// Add a paragraph of narration.
    pub fn with_narration(mut self, text: impl Into<String>) -> Self {
        self.narration.push(text.into());
        self
    }

    /// Add an option. Ignored on code nodes.
    pub fn with_option(mut self, option: StoryOption) -> Self {
        if let NodeInput::Choice { options } = &mut self.input {
            options.push(option);
        }
        self
    }

    /// The options of a choice node; empty for a code node.
    pub fn options(&self) -> &[StoryOption] {
        match &self.input {
            NodeInput::Choice { options } => options,
            NodeInput::Code { .. } => &[],
        }
    }

    /// Accepted input labels: "1" through the number of options.
    pub fn labels(&self) -> Vec<String> {
        (1..=self.options().len()).map(|i| i.to_string()).collect()
    }

    /// Every branch reachable from this node, in order.
    pub fn branches(&self) -> Vec<&Branch> {
        match &self.input {
            NodeInput::Choice { options } => options.iter().map(|o| &o.branch).collect(),
            NodeInput::Code {
                on_match,
                on_mismatch,
                ..
            } => vec![on_match, on_mismatch],
        }
    }
}

/// The story of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryGraph {
    /// Level this graph belongs to.
    pub level: LevelId,
    /// Display name of the level.
    pub title: String,
    /// Paragraphs shown at the start of every attempt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intro: Vec<String>,
    /// First node of every attempt.
    pub entry: NodeId,
    /// All nodes by ID.
    pub nodes: BTreeMap<NodeId, StoryNode>,
}

impl StoryGraph {
    /// An empty graph starting at `entry`.
    pub fn new(level: impl Into<LevelId>, title: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            title: title.into(),
            intro: Vec::new(),
            entry: NodeId::new(entry),
            nodes: BTreeMap::new(),
        }
    }

    /// Add an intro paragraph.
    pub fn with_intro(mut self, text: impl Into<String>) -> Self {
        self.intro.push(text.into());
        self
    }

    /// Add or replace a node.
    pub fn with_node(mut self, id: impl Into<String>, node: StoryNode) -> Self {
        self.nodes.insert(NodeId::new(id), node);
        self
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> StoryResult<&StoryNode> {
        self.nodes.get(id).ok_or_else(|| StoryError::UnknownNode {
            level: self.level.clone(),
            node: id.clone(),
        })
    }

    /// The level banner, e.g. `=== DEATH ISLAND LEVEL ===`.
    pub fn banner(&self) -> String {
        format!("=== {} LEVEL ===", self.title.to_uppercase())
    }
}
