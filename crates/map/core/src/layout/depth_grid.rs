//! Depth/grid layout: first-visit offsets, range mapping, one spacing pass.

use crate::config::{LayoutConfig, SpacingConfig, StrategyKind};
use crate::error::LayoutError;
use crate::geometry::{Bounds, Point};
use crate::graph::{RoomGraph, RoomId};
use crate::layout::mapping::fit_to_bounds;
use crate::layout::spacing::SpacingNormalizer;
use crate::layout::traverse::{self, Visit};
use crate::layout::{Layout, LayoutReport, LayoutStrategy};

/// Grid layout driven by a depth-first, first-visit-wins traversal.
///
/// A room's grid offset is fixed by the first path that reaches it in
/// north, south, east, west, up, down order. Graphs with several paths of
/// different length to the same room can therefore come out distorted;
/// [`AxisGridLayout`](crate::layout::AxisGridLayout) uses shortest paths
/// instead. Output is fully deterministic.
#[derive(Clone, Debug)]
pub struct DepthGridLayout {
    bounds: Bounds,
    spacing: SpacingConfig,
    level_skew: f64,
    seed: u64,
}

impl DepthGridLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            bounds: config.bounds(),
            spacing: config.spacing.clone(),
            level_skew: config.grid.level_skew,
            seed: config.grid.seed,
        }
    }

    /// Raw 3-axis offsets before any mapping.
    pub fn offsets(&self, graph: &RoomGraph, start: &str) -> Result<Vec<Visit>, LayoutError> {
        traverse::depth_first(graph, start)
    }
}

impl Default for DepthGridLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutStrategy for DepthGridLayout {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DepthGrid
    }

    fn layout(&self, graph: &RoomGraph, start: &str) -> Result<Layout, LayoutError> {
        let visits = self.offsets(graph, start)?;

        let projected: Vec<Point> = visits
            .iter()
            .map(|visit| visit.offset.project(self.level_skew))
            .collect();
        let mapped = fit_to_bounds(&projected, self.bounds);

        let mut rooms: Vec<(RoomId, Point)> = visits
            .into_iter()
            .map(|visit| visit.room)
            .zip(mapped)
            .collect();

        let spacing = SpacingNormalizer::new(&self.spacing, self.bounds, self.seed).apply(&mut rooms);

        Ok(Layout::new(
            RoomId::new(start),
            self.kind(),
            rooms,
            LayoutReport {
                spacing,
                ..LayoutReport::default()
            },
        ))
    }
}
