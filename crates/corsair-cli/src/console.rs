use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use corsair_story::{Console, Input, Style};

/// Console on the process's stdin and stdout.
///
/// Lines are read on a background thread. Ctrl-C is caught and delivered
/// through the same channel, so a pending prompt sees it as
/// [`Input::Interrupted`] and asks again.
#[derive(Debug)]
pub struct StdConsole {
    pace: Duration,
    input: Receiver<Input>,
    closed: bool,
}

impl StdConsole {
    /// A console that waits `pace` at every [`Console::pause`].
    ///
    /// Installs the process's Ctrl-C handler, so only one console may be
    /// created per process.
    pub fn new(pace: Duration) -> Result<Self, String> {
        let (tx, rx) = mpsc::channel();

        let interrupts = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupts.send(Input::Interrupted);
        })
        .map_err(|e| format!("cannot install Ctrl-C handler: {e}"))?;

        thread::spawn(move || read_stdin(&tx));

        Ok(Self {
            pace,
            input: rx,
            closed: false,
        })
    }

    fn next_input(&mut self) -> Input {
        if self.closed {
            return Input::Closed;
        }
        match self.input.recv() {
            Ok(input @ (Input::Closed | Input::Error(_))) => {
                self.closed = true;
                input
            }
            Ok(input) => input,
            Err(_) => {
                self.closed = true;
                Input::Closed
            }
        }
    }
}

/// Forward stdin lines until end of file or a read error.
fn read_stdin(tx: &Sender<Input>) {
    let mut stdin = io::stdin().lock();
    loop {
        let mut line = String::new();
        let input = match stdin.read_line(&mut line) {
            Ok(0) => Input::Closed,
            Ok(_) => Input::Line(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => Input::Error(e.to_string()),
        };
        let last = !matches!(input, Input::Line(_));
        if tx.send(input).is_err() || last {
            return;
        }
    }
}

impl Console for StdConsole {
    fn say(&mut self, style: Style, text: &str) {
        let line = match style {
            Style::Banner => text.bold().cyan(),
            Style::Narration => text.normal(),
            Style::Gain => text.green(),
            Style::Loss => text.red(),
            Style::Status => text.blue(),
            Style::Notice => text.yellow(),
        };
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> Input {
        print!("{prompt}");
        if let Err(e) = io::stdout().flush() {
            return Input::Error(e.to_string());
        }

        let input = self.next_input();
        // Nothing echoed a newline after the prompt.
        if !matches!(input, Input::Line(_)) {
            println!();
        }
        input
    }

    fn pause(&mut self) {
        if !self.pace.is_zero() {
            thread::sleep(self.pace);
        }
    }
}
