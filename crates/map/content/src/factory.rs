//! Content factory for loading everything the mini-map needs from a game
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, ensure};
use map_core::{LayoutConfig, RoomGraph, RoomId};
use tracing::{debug, info};

use crate::loaders::{GameManifest, LayoutConfigLoader, LoadResult, ManifestLoader, RoomsLoader};

/// A loaded game: room graph, manifest and layout settings.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub rooms: RoomGraph,
    pub manifest: GameManifest,
    pub layout: LayoutConfig,
}

impl GameContent {
    pub fn starting_room(&self) -> &RoomId {
        &self.manifest.starting_room
    }
}

/// Content factory that loads game content from a game directory.
///
/// # Directory Structure
///
/// ```text
/// game_dir/
/// ├── layout.toml        (optional)
/// └── data/
///     ├── config.json
///     └── rooms.json     (or rooms.ron)
/// ```
pub struct ContentFactory {
    game_dir: PathBuf,
}

impl ContentFactory {
    pub const DATA_DIR: &'static str = "data";
    pub const ROOMS_JSON: &'static str = "rooms.json";
    pub const ROOMS_RON: &'static str = "rooms.ron";
    pub const MANIFEST: &'static str = "config.json";
    pub const LAYOUT_CONFIG: &'static str = "layout.toml";

    /// Creates a new content factory pointing to a game directory.
    pub fn new(game_dir: impl Into<PathBuf>) -> Self {
        Self {
            game_dir: game_dir.into(),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.game_dir.join(Self::DATA_DIR)
    }

    /// Path of the room file: `rooms.json`, or `rooms.ron` when only that
    /// exists.
    pub fn rooms_path(&self) -> PathBuf {
        let json = self.data_dir().join(Self::ROOMS_JSON);
        let ron = self.data_dir().join(Self::ROOMS_RON);
        if !json.exists() && ron.exists() { ron } else { json }
    }

    pub fn load_rooms(&self) -> LoadResult<RoomGraph> {
        RoomsLoader::load(&self.rooms_path())
    }

    /// Load the game manifest from `data/config.json`.
    pub fn load_manifest(&self) -> LoadResult<GameManifest> {
        ManifestLoader::load(&self.data_dir().join(Self::MANIFEST))
    }

    /// Load `layout.toml`, or the default config when the file is absent.
    pub fn load_layout_config(&self) -> LoadResult<LayoutConfig> {
        let path = self.game_dir.join(Self::LAYOUT_CONFIG);
        if !path.exists() {
            debug!(path = %path.display(), "no layout config, using defaults");
            return Ok(LayoutConfig::default());
        }
        LayoutConfigLoader::load(&path)
    }

    /// Load rooms, manifest and layout config, checking that the starting
    /// room exists.
    pub fn load_game(&self) -> LoadResult<GameContent> {
        ensure!(
            self.game_dir.is_dir(),
            "Game directory {} does not exist",
            self.game_dir.display()
        );

        let rooms = self.load_rooms()?;
        let manifest = self.load_manifest()?;
        if !rooms.contains(manifest.starting_room.as_str()) {
            bail!(
                "Invalid game data: starting room '{}' is not in {}",
                manifest.starting_room,
                self.rooms_path().display()
            );
        }
        let layout = self.load_layout_config()?;

        info!(
            game = %self.game_dir.display(),
            rooms = rooms.len(),
            start = %manifest.starting_room,
            strategy = %layout.strategy,
            "loaded game content"
        );

        Ok(GameContent {
            rooms,
            manifest,
            layout,
        })
    }

    /// Returns the game directory path.
    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/games/temple");
        assert_eq!(factory.game_dir(), Path::new("/tmp/games/temple"));
        assert_eq!(factory.data_dir(), Path::new("/tmp/games/temple/data"));
        assert_eq!(
            factory.rooms_path(),
            Path::new("/tmp/games/temple/data/rooms.json")
        );
    }
}
