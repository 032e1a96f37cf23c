//! Content loaders for reading game data from files.
//!
//! Each loader parses one file into an intermediate record and converts it
//! into `map-core` types.

pub mod layout_config;
pub mod manifest;
pub mod rooms;

pub use layout_config::LayoutConfigLoader;
pub use manifest::{GameManifest, ManifestLoader};
pub use rooms::{ExitTarget, RoomRecord, RoomsLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
