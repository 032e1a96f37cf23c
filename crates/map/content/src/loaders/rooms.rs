//! Room data loader.
//!
//! Room files map room identifiers to room records:
//!
//! ```json
//! {
//!   "jungleClearing": {
//!     "description": "You stand in a dense jungle clearing.",
//!     "exits": { "north": "templeEntrance" },
//!     "items": ["torch"]
//!   }
//! }
//! ```
//!
//! Only `exits` (and an optional display `name`) matter for the map; every
//! other field is accepted and ignored.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use map_core::{Direction, Room, RoomGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::loaders::{LoadResult, read_file};

/// One room as authored in the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomRecord {
    #[serde(default, alias = "title", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exit direction name to target room id.
    #[serde(default)]
    pub exits: BTreeMap<String, ExitTarget>,
}

/// Value of one entry in `exits`.
///
/// Anything other than a string is kept as `Invalid` so one bad exit does not
/// reject the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExitTarget {
    Room(String),
    Invalid(serde_json::Value),
}

impl From<&str> for ExitTarget {
    fn from(target: &str) -> Self {
        Self::Room(target.to_owned())
    }
}

/// Loader for room graphs from JSON or RON files.
pub struct RoomsLoader;

impl RoomsLoader {
    /// Load a room graph, picking the format from the file extension.
    ///
    /// `.ron` files are parsed as RON; everything else as JSON.
    pub fn load(path: &Path) -> LoadResult<RoomGraph> {
        let content = read_file(path)?;
        let graph = match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron_str(&content),
            Some("json") | None => Self::from_json_str(&content),
            Some(other) => bail!("Unsupported room file extension '.{other}': {}", path.display()),
        }
        .with_context(|| format!("Failed to load rooms from {}", path.display()))?;

        debug!(path = %path.display(), rooms = graph.len(), "loaded room graph");
        Ok(graph)
    }

    pub fn from_json_str(content: &str) -> LoadResult<RoomGraph> {
        let records: BTreeMap<String, RoomRecord> =
            serde_json::from_str(content).context("Failed to parse rooms JSON")?;
        Ok(Self::build_graph(records))
    }

    pub fn from_ron_str(content: &str) -> LoadResult<RoomGraph> {
        let records: BTreeMap<String, RoomRecord> =
            ron::from_str(content).context("Failed to parse rooms RON")?;
        Ok(Self::build_graph(records))
    }

    /// Converts records into a graph.
    ///
    /// Exit keys that are not a direction are skipped with a warning, as are
    /// empty or non-string targets. Exits to rooms missing from the file are kept; the
    /// layout treats them as dangling.
    pub fn build_graph(records: BTreeMap<String, RoomRecord>) -> RoomGraph {
        records
            .into_iter()
            .map(|(id, record)| {
                let mut room = Room::new(id);
                if let Some(name) = record.name {
                    room = room.with_name(name);
                }

                for (key, target) in record.exits {
                    let direction = match key.parse::<Direction>() {
                        Ok(direction) => direction,
                        Err(err) => {
                            warn!(room = %room.id(), exit = %key, %err, "skipping exit");
                            continue;
                        }
                    };
                    let target = match target {
                        ExitTarget::Room(target) => target,
                        ExitTarget::Invalid(value) => {
                            warn!(room = %room.id(), %direction, %value, "skipping exit with non-string target");
                            continue;
                        }
                    };
                    if target.trim().is_empty() {
                        warn!(room = %room.id(), %direction, "skipping exit with empty target");
                        continue;
                    }
                    room.set_exit(direction, target);
                }

                room
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_narrative_fields() {
        let graph = RoomsLoader::from_json_str(
            r#"{
                "jungleClearing": {
                    "description": "A clearing.",
                    "exits": { "north": "templeEntrance" },
                    "items": ["torch"],
                    "choices": ["Go north"],
                    "narrationAudio": "clearing.mp3"
                },
                "templeEntrance": { "exits": { "south": "jungleClearing" } }
            }"#,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(
            graph.exit("jungleClearing", Direction::North).map(|id| id.as_str()),
            Some("templeEntrance")
        );
    }

    #[test]
    fn unknown_directions_are_skipped() {
        let graph = RoomsLoader::from_json_str(
            r#"{ "hall": { "exits": { "portal": "void", "E": "yard", "down": "" } }, "yard": {} }"#,
        )
        .unwrap();

        let hall = graph.room("hall").unwrap();
        assert_eq!(hall.exits().count(), 1);
        assert_eq!(hall.exit(Direction::East).map(|id| id.as_str()), Some("yard"));
    }

    #[test]
    fn non_string_exit_targets_are_skipped() {
        let graph = RoomsLoader::from_json_str(
            r#"{
                "hall": { "exits": { "north": null, "south": 7, "west": ["yard"], "east": "yard" } },
                "yard": { "exits": { "west": "hall" } }
            }"#,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        let hall = graph.room("hall").unwrap();
        assert_eq!(hall.exits().count(), 1);
        assert_eq!(hall.exit(Direction::East).map(|id| id.as_str()), Some("yard"));
        assert_eq!(
            graph.exit("yard", Direction::West).map(|id| id.as_str()),
            Some("hall")
        );
    }

    #[test]
    fn ron_rooms_with_names() {
        let graph = RoomsLoader::from_ron_str(
            r#"{
                "cellar": (name: Some("Damp Cellar"), exits: { "up": "kitchen" }),
                "kitchen": (exits: { "down": "cellar" }),
            }"#,
        )
        .unwrap();

        assert_eq!(graph.room("cellar").unwrap().label(), "Damp Cellar");
        assert_eq!(graph.room("kitchen").unwrap().label(), "Kitchen");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(RoomsLoader::from_json_str("{ \"hall\": [").is_err());
    }
}
