//! Mini-map layout strategies.
//!
//! Every strategy answers the same question: given a room graph and a start
//! room, where does each reachable room go in `[0, 100]` percentage space?
//!
//! - [`DepthGridLayout`]: first-visit depth-first offsets on a grid
//! - [`ForceDirectedLayout`]: spring/repulsion/centering relaxation
//! - [`AxisGridLayout`]: shortest-hop grid with collision avoidance
//!
//! Rooms that cannot be reached from the start are omitted from the output;
//! callers must treat a missing position as "not on the map".

pub mod axis_grid;
pub mod depth_grid;
pub mod force;
pub mod mapping;
pub mod spacing;
pub mod traverse;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{LayoutConfig, StrategyKind};
use crate::error::LayoutError;
use crate::geometry::Point;
use crate::graph::{RoomGraph, RoomId};

pub use axis_grid::{AxisGridLayout, GridCell, Placement};
pub use depth_grid::DepthGridLayout;
pub use force::ForceDirectedLayout;
pub use spacing::{SpacingNormalizer, SpacingReport, SpacingViolation};
pub use traverse::Visit;

/// Diagnostics collected while computing a layout.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutReport {
    /// Simulation steps run (force-directed only).
    pub steps: usize,
    /// Kinetic energy after the last step (force-directed only).
    pub energy: f64,
    /// Whether the simulation settled before the step ceiling.
    pub converged: bool,
    /// Rooms moved off an occupied grid cell (axis grid only).
    pub relocated: usize,
    pub spacing: SpacingReport,
}

/// Positions of every room reachable from the start room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    start: RoomId,
    strategy: StrategyKind,
    positions: BTreeMap<RoomId, Point>,
    report: LayoutReport,
}

impl Layout {
    pub fn new(
        start: RoomId,
        strategy: StrategyKind,
        rooms: impl IntoIterator<Item = (RoomId, Point)>,
        report: LayoutReport,
    ) -> Self {
        Self {
            start,
            strategy,
            positions: rooms.into_iter().collect(),
            report,
        }
    }

    pub fn start(&self) -> &RoomId {
        &self.start
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn report(&self) -> &LayoutReport {
        &self.report
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in room identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, Point)> {
        self.positions.iter().map(|(id, point)| (id, *point))
    }

    pub fn positions(&self) -> &BTreeMap<RoomId, Point> {
        &self.positions
    }

    pub fn into_positions(self) -> BTreeMap<RoomId, Point> {
        self.positions
    }
}

/// Common interface of the layout strategies.
///
/// Strategies built directly trust their config; [`LayoutEngine`] validates
/// it first.
pub trait LayoutStrategy {
    fn kind(&self) -> StrategyKind;

    /// Positions every room reachable from `start`.
    ///
    /// Fails only when `start` is not in the graph.
    fn layout(&self, graph: &RoomGraph, start: &str) -> Result<Layout, LayoutError>;
}

/// Validated configuration plus strategy selection.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn kind(&self) -> StrategyKind {
        self.config.strategy
    }

    pub fn strategy(&self) -> Box<dyn LayoutStrategy> {
        match self.config.strategy {
            StrategyKind::DepthGrid => Box::new(DepthGridLayout::new(&self.config)),
            StrategyKind::ForceDirected => Box::new(ForceDirectedLayout::new(&self.config)),
            StrategyKind::AxisGrid => Box::new(AxisGridLayout::new(&self.config)),
        }
    }

    pub fn layout(&self, graph: &RoomGraph, start: &str) -> Result<Layout, LayoutError> {
        let layout = self.strategy().layout(graph, start)?;
        let report = layout.report();
        debug!(
            strategy = %layout.strategy(),
            start,
            rooms = graph.len(),
            positioned = layout.len(),
            steps = report.steps,
            converged = report.converged,
            relocated = report.relocated,
            spacing_violations = report.spacing.violations.len(),
            "computed layout"
        );
        Ok(layout)
    }
}

/// Convenience wrapper: validate `config` and run its strategy once.
pub fn compute_layout(
    graph: &RoomGraph,
    start: &str,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    LayoutEngine::new(config.clone())?.layout(graph, start)
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::graph::Direction;

    #[test]
    fn layout_serializes_positions_by_room_id() {
        let mut graph = RoomGraph::new();
        graph.connect_both("a", Direction::East, "b");
        let layout = compute_layout(&graph, "a", &LayoutConfig::default()).unwrap();

        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["strategy"], "depth");
        assert_eq!(json["start"], "a");
        let x = |id: &str| json["positions"][id]["x"].as_f64().unwrap();
        assert!(x("b") > x("a"));

        let back: Layout = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, layout);
    }
}
