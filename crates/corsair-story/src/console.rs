//! Console abstraction and validated prompting.
//!
//! The engine never touches stdin or stdout. Everything it shows goes
//! through [`Console::say`], and every answer comes back from
//! [`Console::read_line`] as an [`Input`].

use std::collections::VecDeque;

use crate::error::{StoryError, StoryResult};

/// How a line of output should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Level banners and headings.
    Banner,
    /// Story text.
    Narration,
    /// Score or health gains.
    Gain,
    /// Score or health losses, deaths, and failures.
    Loss,
    /// Status report lines.
    Status,
    /// Input corrections and other notices.
    Notice,
}

/// Result of reading one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line, without its line terminator.
    Line(String),
    /// The read was interrupted (Ctrl-C, signal).
    Interrupted,
    /// The input stream is at end of file.
    Closed,
    /// The read failed.
    Error(String),
}

/// Terminal I/O as seen by the engine and the session.
pub trait Console {
    /// Show a line of text.
    fn say(&mut self, style: Style, text: &str);

    /// Show `prompt` and read one line.
    fn read_line(&mut self, prompt: &str) -> Input;

    /// Cosmetic delay between story beats.
    fn pause(&mut self) {}
}

/// Notice shown after an interrupted read.
pub const INTERRUPTED_NOTICE: &str = "Input interrupted. Please try again.";

/// How prompts react to a closed or failing input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPolicy {
    /// Consecutive closed or failed reads tolerated before giving up.
    /// `None` re-prompts forever.
    pub max_closed_reads: Option<u32>,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self {
            max_closed_reads: Some(3),
        }
    }
}

impl InputPolicy {
    /// Set the closed-read limit.
    pub fn with_max_closed_reads(mut self, limit: Option<u32>) -> Self {
        self.max_closed_reads = limit;
        self
    }
}

/// Read one line, re-prompting on interruption and on a closed stream.
///
/// Returns [`StoryError::InputClosed`] once the stream has stayed closed for
/// more consecutive reads than the policy allows.
pub fn ask_line<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    policy: &InputPolicy,
) -> StoryResult<String> {
    let mut closed_reads = 0u32;
    loop {
        match console.read_line(prompt) {
            Input::Line(line) => return Ok(line),
            Input::Interrupted => console.say(Style::Notice, INTERRUPTED_NOTICE),
            Input::Closed | Input::Error(_) => {
                closed_reads += 1;
                if policy.max_closed_reads.is_some_and(|max| closed_reads >= max) {
                    tracing::debug!(closed_reads, "giving up on closed input");
                    return Err(StoryError::InputClosed);
                }
                console.say(Style::Notice, INTERRUPTED_NOTICE);
            }
        }
    }
}

/// Read lines until one matches a label. Returns the matched label's index.
pub fn ask_choice<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    labels: &[&str],
    policy: &InputPolicy,
) -> StoryResult<usize> {
    loop {
        let line = ask_line(console, prompt, policy)?;
        let answer = line.trim();
        if let Some(index) = labels.iter().position(|label| *label == answer) {
            return Ok(index);
        }
        console.say(Style::Notice, &invalid_choice_notice(labels));
    }
}

/// `Invalid input. Please choose from: 1, 2`
pub fn invalid_choice_notice<S: AsRef<str>>(labels: &[S]) -> String {
    let labels: Vec<&str> = labels.iter().map(AsRef::as_ref).collect();
    format!("Invalid input. Please choose from: {}", labels.join(", "))
}

/// A console that replays canned input and records everything shown.
///
/// Once the script runs out every read reports [`Input::Closed`].
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<Input>,
    output: Vec<(Style, String)>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    /// A console that answers with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(|l| Input::Line(l.into())).collect(),
            ..Self::default()
        }
    }

    /// Queue one more input event.
    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push_back(input);
        self
    }

    /// Everything shown, with its style.
    pub fn output(&self) -> &[(Style, String)] {
        &self.output
    }

    /// Every prompt that was read from.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// All shown text, one entry per line.
    pub fn transcript(&self) -> String {
        self.output
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|(_, text)| text.contains(needle))
    }

    /// How many shown lines contain `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.output
            .iter()
            .filter(|(_, text)| text.contains(needle))
            .count()
    }

    /// Input events not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, style: Style, text: &str) {
        self.output.push((style, text.to_string()));
    }

    fn read_line(&mut self, prompt: &str) -> Input {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().unwrap_or(Input::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_line_returns_the_line() {
        let mut console = ScriptedConsole::new(["Ahmose"]);
        let line = ask_line(&mut console, "Enter your name: ", &InputPolicy::default()).unwrap();
        assert_eq!(line, "Ahmose");
        assert_eq!(console.prompts(), ["Enter your name: "]);
    }

    #[test]
    fn interrupted_reads_reprompt() {
        let mut console = ScriptedConsole::default()
            .with_input(Input::Interrupted)
            .with_input(Input::Interrupted)
            .with_input(Input::Line("2".into()));
        let line = ask_line(&mut console, "> ", &InputPolicy::default()).unwrap();
        assert_eq!(line, "2");
        assert_eq!(console.count(INTERRUPTED_NOTICE), 2);
    }

    #[test]
    fn closed_stream_gives_up_after_limit() {
        let mut console = ScriptedConsole::default();
        let err = ask_line(&mut console, "> ", &InputPolicy::default()).unwrap_err();
        assert!(matches!(err, StoryError::InputClosed));
        assert_eq!(console.prompts().len(), 3);
    }

    #[test]
    fn closed_and_failed_reads_share_the_limit() {
        let mut console = ScriptedConsole::default()
            .with_input(Input::Closed)
            .with_input(Input::Error("broken pipe".into()))
            .with_input(Input::Line("1".into()));
        let line = ask_line(&mut console, "> ", &InputPolicy::default()).unwrap();
        assert_eq!(line, "1");
    }

    #[test]
    fn choice_reprompts_until_valid() {
        let mut console = ScriptedConsole::new(["3", "yes", " 2 "]);
        let index = ask_choice(
            &mut console,
            "Play again? (1/2): ",
            &["1", "2"],
            &InputPolicy::default(),
        )
        .unwrap();
        assert_eq!(index, 1);
        assert_eq!(console.count("Invalid input. Please choose from: 1, 2"), 2);
    }

    #[test]
    fn limit_of_one() {
        let policy = InputPolicy::default().with_max_closed_reads(Some(1));
        let mut console = ScriptedConsole::default();
        assert!(ask_line(&mut console, "> ", &policy).is_err());
        assert_eq!(console.prompts().len(), 1);
    }
}
