//! Layout configuration and tunable parameters.
//!
//! All sections have defaults, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! strategy = "force"
//!
//! [spacing]
//! min_distance = 10.0
//!
//! [force]
//! max_steps = 800
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::{LayoutError, ParseError};
use crate::geometry::Bounds;

/// Which layout algorithm positions the rooms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// First-visit depth-first offsets mapped onto a grid.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "depth", alias = "depth-grid"))]
    DepthGrid,
    /// Spring/repulsion/centering simulation.
    #[cfg_attr(feature = "serde", serde(rename = "force", alias = "force-directed"))]
    ForceDirected,
    /// Shortest-hop 3-axis grid with collision avoidance and jitter.
    #[cfg_attr(feature = "serde", serde(rename = "axis", alias = "axis-grid"))]
    AxisGrid,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::DepthGrid,
        StrategyKind::ForceDirected,
        StrategyKind::AxisGrid,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DepthGrid => "depth",
            Self::ForceDirected => "force",
            Self::AxisGrid => "axis",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth" | "depth-grid" | "grid" => Ok(Self::DepthGrid),
            "force" | "force-directed" => Ok(Self::ForceDirected),
            "axis" | "axis-grid" => Ok(Self::AxisGrid),
            _ => Err(ParseError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// Drawing area inside the `[0, 100]` percentage space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasConfig {
    /// Empty border kept on every side, in percent.
    pub margin: f64,
}

impl CanvasConfig {
    pub const DEFAULT_MARGIN: f64 = 10.0;

    pub fn bounds(&self) -> Bounds {
        Bounds::from_margin(self.margin)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
        }
    }
}

/// Minimum pairwise distance enforcement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpacingConfig {
    /// Minimum Euclidean distance between two rooms, in percent.
    pub min_distance: f64,
    /// Number of pairwise sweeps. A sweep that moves nothing ends early.
    pub passes: u32,
}

impl SpacingConfig {
    pub const DEFAULT_MIN_DISTANCE: f64 = 8.0;
    pub const DEFAULT_PASSES: u32 = 1;
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            min_distance: Self::DEFAULT_MIN_DISTANCE,
            passes: Self::DEFAULT_PASSES,
        }
    }
}

/// Force-directed simulation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForceConfig {
    /// Rest length of a spring between two connected rooms.
    pub spring_length: f64,
    /// Spring stiffness.
    pub spring_strength: f64,
    /// Inverse-square repulsion constant between every pair.
    pub repulsion: f64,
    /// Pull towards the canvas center.
    pub centering: f64,
    /// Velocity retained per step, strictly between 0 and 1.
    pub damping: f64,
    pub time_step: f64,
    /// Hard ceiling on simulation steps.
    pub max_steps: usize,
    /// Total kinetic energy below which the simulation stops.
    pub energy_threshold: f64,
    /// Per-step speed limit.
    pub max_speed: f64,
}

impl ForceConfig {
    pub const DEFAULT_SPRING_LENGTH: f64 = 20.0;
    pub const DEFAULT_SPRING_STRENGTH: f64 = 0.05;
    pub const DEFAULT_REPULSION: f64 = 200.0;
    pub const DEFAULT_CENTERING: f64 = 0.01;
    pub const DEFAULT_DAMPING: f64 = 0.85;
    pub const DEFAULT_TIME_STEP: f64 = 1.0;
    pub const DEFAULT_MAX_STEPS: usize = 500;
    pub const DEFAULT_ENERGY_THRESHOLD: f64 = 0.01;
    pub const DEFAULT_MAX_SPEED: f64 = 5.0;
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            spring_length: Self::DEFAULT_SPRING_LENGTH,
            spring_strength: Self::DEFAULT_SPRING_STRENGTH,
            repulsion: Self::DEFAULT_REPULSION,
            centering: Self::DEFAULT_CENTERING,
            damping: Self::DEFAULT_DAMPING,
            time_step: Self::DEFAULT_TIME_STEP,
            max_steps: Self::DEFAULT_MAX_STEPS,
            energy_threshold: Self::DEFAULT_ENERGY_THRESHOLD,
            max_speed: Self::DEFAULT_MAX_SPEED,
        }
    }
}

/// Grid strategy parameters shared by the depth and axis grids.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Diagonal shift per up/down level, in grid cells.
    pub level_skew: f64,
    /// Maximum jitter applied by the axis grid, in grid cells.
    pub jitter: f64,
    /// Seed for jitter and tie-breaking directions.
    pub seed: u64,
}

impl GridConfig {
    pub const DEFAULT_LEVEL_SKEW: f64 = 0.35;
    pub const DEFAULT_JITTER: f64 = 0.12;
    pub const DEFAULT_SEED: u64 = 0x5eed;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            level_skew: Self::DEFAULT_LEVEL_SKEW,
            jitter: Self::DEFAULT_JITTER,
            seed: Self::DEFAULT_SEED,
        }
    }
}

/// Complete layout configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub strategy: StrategyKind,
    pub canvas: CanvasConfig,
    pub spacing: SpacingConfig,
    pub force: ForceConfig,
    pub grid: GridConfig,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.spacing.min_distance = min_distance;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.canvas.margin = margin;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.grid.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.force.max_steps = max_steps;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.canvas.bounds()
    }

    /// Checks every parameter against its valid range.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let margin = self.canvas.margin;
        if !margin.is_finite() || !(0.0..50.0).contains(&margin) {
            return Err(LayoutError::invalid(
                "canvas.margin",
                format!("must be in [0, 50), got {margin}"),
            ));
        }

        non_negative("spacing.min_distance", self.spacing.min_distance)?;

        let force = &self.force;
        positive("force.spring_length", force.spring_length)?;
        non_negative("force.spring_strength", force.spring_strength)?;
        non_negative("force.repulsion", force.repulsion)?;
        non_negative("force.centering", force.centering)?;
        positive("force.time_step", force.time_step)?;
        positive("force.max_speed", force.max_speed)?;
        non_negative("force.energy_threshold", force.energy_threshold)?;
        if !(force.damping > 0.0 && force.damping < 1.0) {
            return Err(LayoutError::invalid(
                "force.damping",
                format!("must be in (0, 1), got {}", force.damping),
            ));
        }
        if force.max_steps == 0 {
            return Err(LayoutError::invalid("force.max_steps", "must be at least 1"));
        }

        non_negative("grid.level_skew", self.grid.level_skew)?;
        non_negative("grid.jitter", self.grid.jitter)?;
        if self.grid.jitter >= 0.5 {
            return Err(LayoutError::invalid(
                "grid.jitter",
                format!("must stay below half a cell, got {}", self.grid.jitter),
            ));
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid(field, format!("must be > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));
    }

    #[test]
    fn damping_must_be_below_one() {
        let mut config = LayoutConfig::default();
        config.force.damping = 1.0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig { field: "force.damping", .. })
        ));
    }

    #[test]
    fn zero_steps_rejected() {
        let config = LayoutConfig::default().with_max_steps(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn margin_must_leave_room_to_draw() {
        assert!(LayoutConfig::default().with_margin(50.0).validate().is_err());
        assert!(LayoutConfig::default().with_margin(f64::NAN).validate().is_err());
    }

    #[test]
    fn strategy_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("Force-Directed".parse::<StrategyKind>(), Ok(StrategyKind::ForceDirected));
        assert!("spiral".parse::<StrategyKind>().is_err());
    }
}
