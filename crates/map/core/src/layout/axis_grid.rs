//! Axis grid layout: shortest-hop cells, collision avoidance, jitter.
//!
//! Rooms are discovered breadth-first, so each gets the cell of a shortest
//! path from the start. Up/down levels are folded into the plane as one
//! diagonal cell per level. When two rooms want the same cell, the later
//! one (in discovery order) takes the nearest free cell on the smallest
//! ring around it. Projected coordinates then get a small seeded jitter so
//! parallel corridors do not overlap edge-on, are fitted into the drawing
//! bounds and go through the spacing normalizer.

use std::collections::HashSet;

use tracing::debug;

use crate::config::{LayoutConfig, SpacingConfig, StrategyKind};
use crate::error::LayoutError;
use crate::geometry::{Bounds, GridOffset, Point};
use crate::graph::{RoomGraph, RoomId};
use crate::layout::mapping::fit_to_bounds;
use crate::layout::spacing::SpacingNormalizer;
use crate::layout::traverse;
use crate::layout::{Layout, LayoutReport, LayoutStrategy};
use crate::rng::{PcgRng, seed_for_key};

/// Integer cell on the folded 2D grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Folds a 3-axis offset into the plane; "up" moves one cell up-right.
    pub const fn from_offset(offset: GridOffset) -> Self {
        Self::new(
            offset.east_west - offset.up_down,
            offset.north_south + offset.up_down,
        )
    }
}

/// Cells assigned to every reachable room, in discovery order.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub cells: Vec<(RoomId, GridCell)>,
    /// Rooms that did not get the cell their offset asked for.
    pub relocated: usize,
}

#[derive(Clone, Debug)]
pub struct AxisGridLayout {
    bounds: Bounds,
    spacing: SpacingConfig,
    jitter: f64,
    seed: u64,
}

impl AxisGridLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            bounds: config.bounds(),
            spacing: config.spacing.clone(),
            jitter: config.grid.jitter,
            seed: config.grid.seed,
        }
    }

    /// Assigns each reachable room a distinct grid cell.
    pub fn place(&self, graph: &RoomGraph, start: &str) -> Result<Placement, LayoutError> {
        let visits = traverse::breadth_first(graph, start)?;
        let mut occupied = HashSet::with_capacity(visits.len());
        let mut cells = Vec::with_capacity(visits.len());
        let mut relocated = 0;

        for visit in visits {
            let wanted = GridCell::from_offset(visit.offset);
            let cell = nearest_free(wanted, &occupied);
            if cell != wanted {
                relocated += 1;
                debug!(room = %visit.room, ?wanted, ?cell, "grid cell taken, relocating room");
            }
            occupied.insert(cell);
            cells.push((visit.room, cell));
        }

        Ok(Placement { cells, relocated })
    }

    fn jittered(&self, room: &RoomId, cell: GridCell) -> Point {
        let base = Point::new(f64::from(cell.x), f64::from(cell.y));
        if self.jitter <= 0.0 {
            return base;
        }
        let mut rng = PcgRng::new(seed_for_key(self.seed, room.as_str()));
        Point::new(
            base.x + rng.next_signed() * self.jitter,
            base.y + rng.next_signed() * self.jitter,
        )
    }
}

impl Default for AxisGridLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutStrategy for AxisGridLayout {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AxisGrid
    }

    fn layout(&self, graph: &RoomGraph, start: &str) -> Result<Layout, LayoutError> {
        let placement = self.place(graph, start)?;

        let projected: Vec<Point> = placement
            .cells
            .iter()
            .map(|(room, cell)| self.jittered(room, *cell))
            .collect();
        let mapped = fit_to_bounds(&projected, self.bounds);

        let mut rooms: Vec<(RoomId, Point)> = placement
            .cells
            .into_iter()
            .map(|(room, _)| room)
            .zip(mapped)
            .collect();
        let spacing = SpacingNormalizer::new(&self.spacing, self.bounds, self.seed).apply(&mut rooms);

        Ok(Layout::new(
            RoomId::new(start),
            self.kind(),
            rooms,
            LayoutReport {
                relocated: placement.relocated,
                spacing,
                ..LayoutReport::default()
            },
        ))
    }
}

/// `wanted` if free, otherwise the closest free cell on the smallest ring.
///
/// Ring cells are scanned by squared distance, then row, then column, so the
/// choice is deterministic.
fn nearest_free(wanted: GridCell, occupied: &HashSet<GridCell>) -> GridCell {
    if !occupied.contains(&wanted) {
        return wanted;
    }

    let mut radius: i32 = 1;
    loop {
        let mut ring: Vec<(i32, i32)> = (-radius..=radius)
            .flat_map(|dy| (-radius..=radius).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| dx.abs().max(dy.abs()) == radius)
            .collect();
        ring.sort_by_key(|&(dx, dy)| (dx * dx + dy * dy, dy, dx));

        if let Some(cell) = ring
            .into_iter()
            .map(|(dx, dy)| GridCell::new(wanted.x + dx, wanted.y + dy))
            .find(|cell| !occupied.contains(cell))
        {
            return cell;
        }
        radius += 1;
    }
}
