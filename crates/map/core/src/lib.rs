//! Deterministic mini-map layout for room-based adventure games.
//!
//! `map-core` turns a [`RoomGraph`] (rooms connected by directional exits)
//! into percentage coordinates in `[0, 100]` for every room reachable from a
//! start room. It never loads files or draws anything: loaders build the
//! graph, front ends consume a [`Layout`] or a [`MapView`] built from one.
//! All strategies are pure functions of graph, start room and
//! [`LayoutConfig`], so the same input always yields the same map.
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod rng;
pub mod store;
pub mod view;
pub use config::{
    CanvasConfig, ForceConfig, GridConfig, LayoutConfig, SpacingConfig, StrategyKind,
};
pub use error::{ErrorSeverity, LayoutError, MapError, ParseError};
pub use geometry::{Bounds, GridOffset, PERCENT_MAX, PERCENT_MID, PERCENT_MIN, Point};
pub use graph::{Connection, DanglingExit, Direction, Room, RoomGraph, RoomId};
pub use layout::{
    AxisGridLayout, DepthGridLayout, ForceDirectedLayout, GridCell, Layout, LayoutEngine,
    LayoutReport, LayoutStrategy, SpacingNormalizer, SpacingReport, SpacingViolation, Visit,
    compute_layout,
};
pub use store::{GraphFingerprint, LayoutStore};
pub use view::{EdgeView, Exploration, MapRenderer, MapView, NodeView, Reveal};
