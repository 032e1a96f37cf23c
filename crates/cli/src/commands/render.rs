//! Draw the mini-map for a player's exploration state.

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use map_core::{Exploration, LayoutStore, MapRenderer, MapView, Reveal, StrategyKind};
use tracing::warn;

use super::{build_engine, load_game, resolve_layout_config, resolve_start};
use crate::config::AtlasConfig;
use crate::presentation::{SvgRenderer, TextRenderer, write_output};

/// Draw the mini-map around the player
#[derive(Parser)]
pub struct Render {
    /// Game directory containing `data/rooms.json` and `data/config.json`
    #[arg(value_name = "GAME_DIR")]
    game_dir: PathBuf,

    /// Room the player is in
    #[arg(long, value_name = "ROOM")]
    current: String,

    /// Rooms already visited (comma separated)
    #[arg(long, value_name = "ROOMS", value_delimiter = ',')]
    visited: Vec<String>,

    /// Which rooms to show: all or visited
    #[arg(long, default_value = "all")]
    reveal: Reveal,

    /// Start room the layout is anchored on (defaults to the game's)
    #[arg(short, long, value_name = "ROOM")]
    start: Option<String>,

    /// Layout strategy: depth, force or axis
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<StrategyKind>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: RenderFormat,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    /// Character-grid map with legend
    Text,
    /// SVG drawing
    Svg,
}

impl Render {
    pub fn execute(self, env: &AtlasConfig) -> Result<()> {
        let game = load_game(&self.game_dir)?;
        ensure!(
            game.rooms.contains(&self.current),
            "Current room '{}' is not in the room graph",
            self.current
        );

        let config = resolve_layout_config(&game, None, env, self.strategy)?;
        let mut store = LayoutStore::new(build_engine(config)?);
        let start = resolve_start(&game, self.start);

        let mut exploration = Exploration::new(self.reveal);
        for room in self.visited.iter().map(|room| room.trim()).filter(|room| !room.is_empty()) {
            if !game.rooms.contains(room) {
                warn!(room, "ignoring unknown visited room");
                continue;
            }
            exploration.mark_visited(room);
        }
        exploration.enter(self.current.as_str());

        let layout = store.refresh(&game.rooms, start.as_str())?;
        if !layout.contains(&self.current) {
            warn!(
                current = %self.current,
                start = %start,
                "current room is unreachable from the start room and will not be drawn"
            );
        }

        let view = MapView::build(&game.rooms, layout, &exploration);
        let rendered = match self.format {
            RenderFormat::Text => TextRenderer::default()
                .colored(self.output.is_none())
                .render(&view),
            RenderFormat::Svg => SvgRenderer::default().render(&view),
        };

        write_output(self.output.as_deref(), &rendered)
    }
}
