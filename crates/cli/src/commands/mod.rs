//! Subcommand implementations.

mod check;
mod layout;
mod render;

pub use check::Check;
pub use layout::Layout;
pub use render::Render;

use std::path::Path;

use anyhow::{Context, Result};
use map_content::{ContentFactory, GameContent, LayoutConfigLoader};
use map_core::{LayoutConfig, LayoutEngine, RoomId, StrategyKind};

use crate::config::AtlasConfig;

fn load_game(game_dir: &Path) -> Result<GameContent> {
    ContentFactory::new(game_dir)
        .load_game()
        .with_context(|| format!("Failed to load game from {}", game_dir.display()))
}

/// Layout settings in precedence order: game `layout.toml` (or `--config`),
/// environment, then `--strategy`.
fn resolve_layout_config(
    game: &GameContent,
    config_file: Option<&Path>,
    env: &AtlasConfig,
    strategy: Option<StrategyKind>,
) -> Result<LayoutConfig> {
    let base = match config_file {
        Some(path) => LayoutConfigLoader::load(path)?,
        None => game.layout.clone(),
    };

    let mut config = env.apply(base);
    if let Some(strategy) = strategy {
        config = config.with_strategy(strategy);
    }
    Ok(config)
}

fn build_engine(config: LayoutConfig) -> Result<LayoutEngine> {
    LayoutEngine::new(config).context("Invalid layout configuration")
}

/// `--start` when given, otherwise the manifest's starting room.
fn resolve_start(game: &GameContent, start: Option<String>) -> RoomId {
    start
        .map(RoomId::from)
        .unwrap_or_else(|| game.starting_room().clone())
}
