//! Data-driven room graphs and layout settings.
//!
//! This crate reads the files a game directory ships with and turns them into
//! `map-core` inputs:
//! - Room data (JSON, or RON for hand-written fixtures)
//! - Game manifest (`config.json`, starting room)
//! - Layout configuration (TOML)
//!
//! Only the fields the mini-map needs are read. Descriptions, items, choices
//! and audio cues are left for the rest of the game to interpret.

pub mod factory;
pub mod loaders;

pub use factory::{ContentFactory, GameContent};
pub use loaders::{
    ExitTarget, GameManifest, LayoutConfigLoader, LoadResult, ManifestLoader, RoomRecord, RoomsLoader,
};
