//! Game manifest loader (`data/config.json`).

use std::path::Path;

use anyhow::Context;
use map_core::RoomId;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Game-level settings the map needs. Other manifest fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameManifest {
    pub starting_room: RoomId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Loader for game manifests from JSON files.
pub struct ManifestLoader;

impl ManifestLoader {
    pub fn load(path: &Path) -> LoadResult<GameManifest> {
        let content = read_file(path)?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load game manifest {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> LoadResult<GameManifest> {
        serde_json::from_str(content).context("Failed to parse manifest JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_starting_room() {
        let manifest = ManifestLoader::from_json_str(
            r#"{ "startingRoom": "jungleClearing", "title": "Temple Adventure", "music": "theme.mp3" }"#,
        )
        .unwrap();
        assert_eq!(manifest.starting_room.as_str(), "jungleClearing");
        assert_eq!(manifest.title.as_deref(), Some("Temple Adventure"));
    }

    #[test]
    fn missing_starting_room_is_an_error() {
        assert!(ManifestLoader::from_json_str(r#"{ "title": "Untitled" }"#).is_err());
    }
}
