//! Compute a layout for a game directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use map_core::{Exploration, MapRenderer, MapView, Reveal, StrategyKind};
use tracing::info;

use super::{build_engine, load_game, resolve_layout_config, resolve_start};
use crate::config::AtlasConfig;
use crate::presentation::{SvgRenderer, TextRenderer, write_output};

/// Compute a layout and print it
#[derive(Parser)]
pub struct Layout {
    /// Game directory containing `data/rooms.json` and `data/config.json`
    #[arg(value_name = "GAME_DIR")]
    game_dir: PathBuf,

    /// Start room (defaults to the game's starting room)
    #[arg(short, long, value_name = "ROOM")]
    start: Option<String>,

    /// Layout strategy: depth, force or axis
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<StrategyKind>,

    /// Layout config TOML (defaults to `<GAME_DIR>/layout.toml`)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: LayoutFormat,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LayoutFormat {
    /// Positions, strategy and diagnostics as JSON
    Json,
    /// Character-grid map with legend
    Text,
    /// SVG drawing
    Svg,
}

impl Layout {
    pub fn execute(self, env: &AtlasConfig) -> Result<()> {
        let game = load_game(&self.game_dir)?;
        let config = resolve_layout_config(&game, self.config.as_deref(), env, self.strategy)?;
        let engine = build_engine(config)?;
        let start = resolve_start(&game, self.start);

        let layout = engine
            .layout(&game.rooms, start.as_str())
            .with_context(|| format!("Failed to lay out {}", self.game_dir.display()))?;
        info!(
            strategy = %layout.strategy(),
            rooms = layout.len(),
            spacing_violations = layout.report().spacing.violations.len(),
            "layout ready"
        );

        let rendered = match self.format {
            LayoutFormat::Json => {
                serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?
            }
            LayoutFormat::Text | LayoutFormat::Svg => {
                let mut exploration = Exploration::new(Reveal::All);
                exploration.enter(start.clone());
                let view = MapView::build(&game.rooms, &layout, &exploration);
                match self.format {
                    LayoutFormat::Svg => SvgRenderer::default().render(&view),
                    _ => TextRenderer::default()
                        .colored(self.output.is_none())
                        .render(&view),
                }
            }
        };

        write_output(self.output.as_deref(), &rendered)
    }
}
