//! Diagnose a game's room graph under every layout strategy.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use map_core::layout::traverse;
use map_core::{LayoutReport, StrategyKind};

use super::{build_engine, load_game, resolve_layout_config, resolve_start};
use crate::config::AtlasConfig;

/// Report reachability, dangling exits and spacing
#[derive(Parser)]
pub struct Check {
    /// Game directory containing `data/rooms.json` and `data/config.json`
    #[arg(value_name = "GAME_DIR")]
    game_dir: PathBuf,

    /// Start room (defaults to the game's starting room)
    #[arg(short, long, value_name = "ROOM")]
    start: Option<String>,

    /// Layout config TOML (defaults to `<GAME_DIR>/layout.toml`)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Check {
    pub fn execute(self, env: &AtlasConfig) -> Result<()> {
        let game = load_game(&self.game_dir)?;
        let base = resolve_layout_config(&game, self.config.as_deref(), env, None)?;
        let start = resolve_start(&game, self.start);

        let unreachable = traverse::unreachable(&game.rooms, start.as_str())
            .with_context(|| format!("Cannot check from start room '{start}'"))?;
        let dangling = game.rooms.dangling_exits();

        println!(
            "{} {}",
            style("Game:").bold().cyan(),
            self.game_dir.display()
        );
        println!("{} {}", style("Start room:").bold().cyan(), start);
        println!(
            "{} {} ({} reachable)",
            style("Rooms:").bold().cyan(),
            game.rooms.len(),
            game.rooms.len() - unreachable.len()
        );
        println!();

        if unreachable.is_empty() {
            println!("{}", style("Every room is reachable").green());
        } else {
            println!(
                "{}",
                style(format!("Unreachable rooms ({}):", unreachable.len()))
                    .bold()
                    .yellow()
            );
            for room in &unreachable {
                println!("  {room}");
            }
        }

        if dangling.is_empty() {
            println!("{}", style("No dangling exits").green());
        } else {
            println!(
                "{}",
                style(format!("Dangling exits ({}):", dangling.len()))
                    .bold()
                    .yellow()
            );
            for exit in &dangling {
                println!("  {} --{}--> {}", exit.from, exit.direction, exit.target);
            }
        }
        println!();

        for strategy in StrategyKind::ALL {
            let engine = build_engine(base.clone().with_strategy(strategy))?;
            let layout = engine.layout(&game.rooms, start.as_str())?;
            print_report(strategy, layout.len(), layout.report());
        }

        Ok(())
    }
}

fn print_report(strategy: StrategyKind, positioned: usize, report: &LayoutReport) {
    println!(
        "{} {positioned} rooms positioned",
        style(format!("[{strategy}]")).bold().magenta()
    );

    match strategy {
        StrategyKind::ForceDirected => {
            let status = if report.converged {
                style("converged").green()
            } else {
                style("hit step ceiling").yellow()
            };
            println!(
                "  simulation: {status} after {} steps (energy {:.4})",
                report.steps, report.energy
            );
        }
        StrategyKind::AxisGrid => println!("  relocated rooms: {}", report.relocated),
        StrategyKind::DepthGrid => {}
    }

    let spacing = &report.spacing;
    if spacing.is_satisfied() {
        println!(
            "  spacing: {} (min {:.1}, {} adjustments)",
            style("ok").green(),
            spacing.min_distance,
            spacing.adjustments
        );
    } else {
        println!(
            "  spacing: {} pairs closer than {:.1}{}",
            style(spacing.violations.len()).red().bold(),
            spacing.min_distance,
            if spacing.feasible {
                ""
            } else {
                " (too many rooms for the canvas at this spacing)"
            }
        );
        for violation in &spacing.violations {
            println!(
                "    {} <-> {}: {:.2}",
                violation.a, violation.b, violation.distance
            );
        }
    }
}
