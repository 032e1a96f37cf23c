//! Mini-map layout tool for room-based adventure games.
//!
//! Run with: `atlas <command>`

mod commands;
mod config;
mod dirs;
mod logging;
mod presentation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Layout, Render};
use config::AtlasConfig;

/// Mini-map layouts for room-based adventure games
#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Lay out and inspect adventure game mini-maps", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to the platform log directory (or ATLAS_LOG_DIR)
    #[arg(long, global = true)]
    log: bool,

    /// Write logs to this file instead
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Compute a layout and print it as JSON, text or SVG
    Layout(Layout),

    /// Report reachability, dangling exits and spacing for every strategy
    Check(Check),

    /// Draw the mini-map around a player's exploration state
    Render(Render),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AtlasConfig::from_env();
    let _guard = logging::setup_logging(&config, cli.log, cli.log_file)?;

    match cli.command {
        Command::Layout(cmd) => cmd.execute(&config),
        Command::Check(cmd) => cmd.execute(&config),
        Command::Render(cmd) => cmd.execute(&config),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::try_parse_from([
            "atlas",
            "render",
            "games/temple",
            "--current",
            "hallOfStatues",
            "--visited",
            "jungleClearing,templeEntrance",
            "--reveal",
            "visited",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Render(_)));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let parsed = Cli::try_parse_from(["atlas", "layout", "games/temple", "--strategy", "spiral"]);
        assert!(parsed.is_err());
    }
}
