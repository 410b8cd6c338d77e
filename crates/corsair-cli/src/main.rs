//! CLI frontend for the Corsair text adventure.

mod commands;
mod console;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::play::PlayArgs;

#[derive(Parser)]
#[command(
    name = "corsair",
    about = "Corsair: sail for the King of Egypt in a four-level text adventure",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game (the default when no command is given)
    Play(PlayArgs),

    /// Validate a campaign file and summarize its levels
    Check {
        /// Campaign JSON file
        file: PathBuf,
    },

    /// Run the four-operation calculator
    Calc,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Play(cli.play)) {
        Commands::Play(args) => commands::play::run(&args),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Calc => console::StdConsole::new(Duration::ZERO)
            .and_then(|mut console| commands::calc::run(&mut console)),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `CORSAIR_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CORSAIR_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
