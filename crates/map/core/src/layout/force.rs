//! Force-directed layout: springs, repulsion and centering with damping.
//!
//! Rooms start evenly spaced on a circle in traversal order. Each step sums
//! three forces per room:
//!
//! - a spring along every connection, pulling towards the rest length
//! - inverse-square repulsion between every pair
//! - a weak pull towards the canvas center
//!
//! Velocities integrate the forces and are damped; positions integrate the
//! velocities and are clamped into the drawing bounds; a room held against
//! a wall loses the velocity component the wall cancels. The loop ends when
//! total kinetic energy (sum of squared velocities) drops below the
//! threshold or the step ceiling is hit, whichever comes first.

use std::collections::{BTreeSet, HashMap};
use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::{debug, trace};

use crate::config::{ForceConfig, LayoutConfig, SpacingConfig, StrategyKind};
use crate::error::LayoutError;
use crate::geometry::{Bounds, Point};
use crate::graph::{RoomGraph, RoomId};
use crate::layout::spacing::SpacingNormalizer;
use crate::layout::traverse;
use crate::layout::{Layout, LayoutReport, LayoutStrategy};
use crate::rng::{PcgRng, seed_for_pair};

/// Pairs closer than this are treated as this far apart.
const MIN_SEPARATION: f64 = 0.1;

/// Result of running the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    pub positions: Vec<Point>,
    pub steps: usize,
    pub energy: f64,
    pub converged: bool,
}

/// Spring-repulsion-centering relaxation.
///
/// Deterministic for a given graph and start room: seeding follows the
/// traversal order and coincident rooms separate along seeded directions.
#[derive(Clone, Debug)]
pub struct ForceDirectedLayout {
    force: ForceConfig,
    spacing: SpacingConfig,
    bounds: Bounds,
    seed: u64,
}

impl ForceDirectedLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            force: config.force.clone(),
            spacing: config.spacing.clone(),
            bounds: config.bounds(),
            seed: config.grid.seed,
        }
    }

    /// Runs the simulation for `n` bodies joined by `springs` (index pairs).
    pub fn simulate(&self, n: usize, springs: &[(usize, usize)]) -> Simulation {
        let center = self.bounds.center();
        if n <= 1 {
            return Simulation {
                positions: vec![center; n],
                steps: 0,
                energy: 0.0,
                converged: true,
            };
        }

        let cfg = &self.force;
        let mut positions = self.seed_circle(n);
        let mut velocities = vec![Point::default(); n];
        let mut forces = vec![Point::default(); n];
        let mut energy = 0.0;
        let mut steps = 0;
        let mut converged = false;

        while steps < cfg.max_steps {
            forces.fill(Point::default());
            self.apply_repulsion(&positions, &mut forces);
            self.apply_springs(&positions, springs, &mut forces);
            for (force, position) in forces.iter_mut().zip(&positions) {
                *force = *force + (center - *position).scale(cfg.centering);
            }

            energy = 0.0;
            for ((position, velocity), force) in
                positions.iter_mut().zip(velocities.iter_mut()).zip(&forces)
            {
                let mut next = (*velocity + force.scale(cfg.time_step)).scale(cfg.damping);
                let speed = next.length();
                if speed > cfg.max_speed {
                    next = next.scale(cfg.max_speed / speed);
                }
                let target = *position + next.scale(cfg.time_step);
                let clamped = self.bounds.clamp_point(target);
                // A wall absorbs the velocity component it cancels.
                if clamped.x != target.x {
                    next.x = 0.0;
                }
                if clamped.y != target.y {
                    next.y = 0.0;
                }
                *velocity = next;
                *position = clamped;
                energy += next.x * next.x + next.y * next.y;
            }

            steps += 1;
            trace!(step = steps, energy, "force step");
            if energy < cfg.energy_threshold {
                converged = true;
                break;
            }
        }

        if !converged {
            debug!(steps, energy, "force layout hit the step ceiling before settling");
        }

        Simulation {
            positions,
            steps,
            energy,
            converged,
        }
    }

    /// Evenly spaced points on a circle around the center, first at the top.
    fn seed_circle(&self, n: usize) -> Vec<Point> {
        let center = self.bounds.center();
        let radius = (self.force.spring_length * n as f64 / TAU)
            .max(self.force.spring_length / 2.0)
            .min(self.bounds.span() / 2.0);

        (0..n)
            .map(|k| {
                let angle = -FRAC_PI_2 + TAU * k as f64 / n as f64;
                self.bounds.clamp_point(Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ))
            })
            .collect()
    }

    fn apply_repulsion(&self, positions: &[Point], forces: &mut [Point]) {
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let delta = positions[j] - positions[i];
                let mut distance = delta.length();
                let unit = if distance > MIN_SEPARATION {
                    delta.scale(1.0 / distance)
                } else {
                    distance = MIN_SEPARATION;
                    let (x, y) = PcgRng::new(seed_for_pair(self.seed, i, j)).next_direction();
                    Point::new(x, y)
                };

                let push = unit.scale(self.force.repulsion / (distance * distance));
                forces[i] = forces[i] - push;
                forces[j] = forces[j] + push;
            }
        }
    }

    fn apply_springs(&self, positions: &[Point], springs: &[(usize, usize)], forces: &mut [Point]) {
        for &(i, j) in springs {
            let delta = positions[j] - positions[i];
            let distance = delta.length();
            if distance <= MIN_SEPARATION {
                continue;
            }

            let stretch = distance - self.force.spring_length;
            let pull = delta.scale(self.force.spring_strength * stretch / distance);
            forces[i] = forces[i] + pull;
            forces[j] = forces[j] - pull;
        }
    }
}

impl Default for ForceDirectedLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutStrategy for ForceDirectedLayout {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ForceDirected
    }

    fn layout(&self, graph: &RoomGraph, start: &str) -> Result<Layout, LayoutError> {
        let ids: Vec<RoomId> = traverse::depth_first(graph, start)?
            .into_iter()
            .map(|visit| visit.room)
            .collect();
        let springs = springs(graph, &ids);
        let simulation = self.simulate(ids.len(), &springs);

        let mut rooms: Vec<(RoomId, Point)> = ids.into_iter().zip(simulation.positions).collect();
        let spacing = SpacingNormalizer::new(&self.spacing, self.bounds, self.seed).apply(&mut rooms);

        Ok(Layout::new(
            RoomId::new(start),
            self.kind(),
            rooms,
            LayoutReport {
                steps: simulation.steps,
                energy: simulation.energy,
                converged: simulation.converged,
                relocated: 0,
                spacing,
            },
        ))
    }
}

/// Undirected, de-duplicated index pairs for every exit between two
/// positioned rooms. Self-loops produce no spring.
pub fn springs(graph: &RoomGraph, ids: &[RoomId]) -> Vec<(usize, usize)> {
    let index: HashMap<&RoomId, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let mut pairs = BTreeSet::new();

    for (i, id) in ids.iter().enumerate() {
        for (_, target) in graph.neighbors(id.as_str()) {
            if let Some(&j) = index.get(target)
                && i != j
            {
                pairs.insert((i.min(j), i.max(j)));
            }
        }
    }

    pairs.into_iter().collect()
}
