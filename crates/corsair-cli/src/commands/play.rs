use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use corsair_game::{GameConfig, GameSession};

use crate::console::StdConsole;

#[derive(Args, Clone)]
pub struct PlayArgs {
    /// RNG seed for reproducible codes and rewards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Player name (skips the name prompt)
    #[arg(long)]
    pub name: Option<String>,

    /// Delay between story beats, in milliseconds
    #[arg(long, default_value_t = 600)]
    pub pace_ms: u64,

    /// Campaign JSON file to play instead of the built-in levels
    #[arg(long)]
    pub campaign: Option<PathBuf>,

    /// Score that wins the game after a level
    #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
    pub win_score: i64,

    /// Score that loses the game after a level
    #[arg(long, default_value_t = -100, allow_negative_numbers = true)]
    pub lose_score: i64,
}

pub fn run(args: &PlayArgs) -> Result<(), String> {
    let campaign = super::load_campaign(args.campaign.as_deref())?;

    let mut config = GameConfig::default()
        .with_win_score(args.win_score)
        .with_lose_score(args.lose_score);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(name) = &args.name {
        config = config.with_player_name(name.as_str());
    }

    let mut console = StdConsole::new(Duration::from_millis(args.pace_ms))?;
    let session = match GameSession::start(&mut console, campaign, config) {
        Ok(session) => session,
        // Nothing to play without a name.
        Err(e) if e.is_input_closed() => return Ok(()),
        Err(e) => return Err(e.to_string()),
    };

    let summary = session.play().map_err(|e| e.to_string())?;
    tracing::debug!(?summary, "game over");
    Ok(())
}
