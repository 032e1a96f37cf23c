//! Minimum pairwise spacing enforcement.
//!
//! Each sweep compares every pair of rooms once, in layout order. A pair
//! closer than the minimum is pushed apart symmetrically along the vector
//! joining them, each room moving half of the deficit, and both results are
//! clamped into the drawing bounds. Sweeps are not repeated until
//! convergence; whatever is still too close afterwards is reported rather
//! than hidden.

use tracing::warn;

use crate::config::SpacingConfig;
use crate::geometry::{Bounds, Point};
use crate::graph::RoomId;
use crate::rng::{PcgRng, seed_for_pair};

/// Distances within this tolerance of the minimum count as satisfied.
pub const SPACING_TOLERANCE: f64 = 1e-6;

/// Two rooms still closer than the configured minimum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpacingViolation {
    pub a: RoomId,
    pub b: RoomId,
    pub distance: f64,
}

/// Outcome of a spacing pass.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpacingReport {
    pub min_distance: f64,
    /// Number of pair adjustments made across all sweeps.
    pub adjustments: usize,
    pub sweeps: u32,
    /// Pairs still below the minimum after the last sweep.
    pub violations: Vec<SpacingViolation>,
    /// False when more rooms exist than minimum-spaced slots fit in bounds.
    ///
    /// Only a capacity check: a feasible layout can still end with
    /// `violations` when the configured sweeps run out, since a push that
    /// fixes one pair may crowd a pair already visited.
    pub feasible: bool,
}

impl SpacingReport {
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Pushes rooms apart until pairs respect a minimum distance.
#[derive(Clone, Debug)]
pub struct SpacingNormalizer {
    min_distance: f64,
    passes: u32,
    bounds: Bounds,
    seed: u64,
}

impl SpacingNormalizer {
    pub fn new(config: &SpacingConfig, bounds: Bounds, seed: u64) -> Self {
        Self {
            min_distance: config.min_distance,
            passes: config.passes,
            bounds,
            seed,
        }
    }

    /// Upper bound on rooms that fit in the bounds at the minimum spacing.
    ///
    /// Counts slots of a square lattice with pitch `min_distance`.
    pub fn capacity(&self) -> usize {
        if self.min_distance <= SPACING_TOLERANCE {
            return usize::MAX;
        }
        let per_axis = (self.bounds.span() / self.min_distance).floor() as usize + 1;
        per_axis.saturating_mul(per_axis)
    }

    pub fn apply(&self, rooms: &mut [(RoomId, Point)]) -> SpacingReport {
        let mut report = SpacingReport {
            min_distance: self.min_distance,
            feasible: rooms.len() <= self.capacity(),
            ..SpacingReport::default()
        };

        for _ in 0..self.passes {
            report.sweeps += 1;
            let moved = self.sweep(rooms);
            report.adjustments += moved;
            if moved == 0 {
                break;
            }
        }

        report.violations = self.violations(rooms);
        if !report.violations.is_empty() {
            warn!(
                violations = report.violations.len(),
                min_distance = self.min_distance,
                feasible = report.feasible,
                "rooms remain closer than the minimum spacing"
            );
        }

        report
    }

    fn sweep(&self, rooms: &mut [(RoomId, Point)]) -> usize {
        let mut moved = 0;
        let n = rooms.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let a = rooms[i].1;
                let b = rooms[j].1;
                let distance = a.distance(b);
                if distance >= self.min_distance - SPACING_TOLERANCE {
                    continue;
                }

                let (ux, uy) = if distance > SPACING_TOLERANCE {
                    ((b.x - a.x) / distance, (b.y - a.y) / distance)
                } else {
                    PcgRng::new(seed_for_pair(self.seed, i, j)).next_direction()
                };
                let push = (self.min_distance - distance) / 2.0;

                rooms[i].1 = self
                    .bounds
                    .clamp_point(Point::new(a.x - ux * push, a.y - uy * push));
                rooms[j].1 = self
                    .bounds
                    .clamp_point(Point::new(b.x + ux * push, b.y + uy * push));
                moved += 1;
            }
        }

        moved
    }

    fn violations(&self, rooms: &[(RoomId, Point)]) -> Vec<SpacingViolation> {
        let mut out = Vec::new();
        for (i, (a_id, a)) in rooms.iter().enumerate() {
            for (b_id, b) in &rooms[i + 1..] {
                let distance = a.distance(*b);
                if distance < self.min_distance - SPACING_TOLERANCE {
                    out.push(SpacingViolation {
                        a: a_id.clone(),
                        b: b_id.clone(),
                        distance,
                    });
                }
            }
        }
        out
    }
}
