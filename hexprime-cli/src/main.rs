//! HEXPRIME CLI - play Hex matches from the terminal
//!
//! Usage: `hexprime <SIZE> <PLAYER_ONE> <PLAYER_TWO> [--auto-print]`
//!
//! Naming player two `BogoAI` or `HeroAI` puts an automated player in that seat.
//! Commands are read line by line from stdin; `help` lists them.

mod commands;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexprime_core::{MatchConfig, SessionManager};

use crate::commands::Shell;

#[derive(Parser)]
#[command(name = "hexprime")]
#[command(about = "Hex connection game with the pie rule and automated opponents")]
struct Cli {
    /// Board side length (odd, 5 to 12345)
    size: usize,

    /// Name of the first player, who opens the first game
    player_one: String,

    /// Name of the second player (BogoAI or HeroAI for an automated opponent)
    player_two: String,

    /// Print the board after every move
    #[arg(long)]
    auto_print: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the game protocol on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = MatchConfig::new(cli.size, cli.player_one, cli.player_two);
    let manager = SessionManager::new(config).context("could not open the match")?;

    let mut shell = Shell::new(manager, cli.auto_print, io::stdout().lock(), io::stderr().lock());
    shell.greet()?;
    shell.run(io::stdin().lock())?;

    tracing::debug!(sessions = shell.manager().sessions().len(), "input closed");
    Ok(())
}
