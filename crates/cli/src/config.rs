//! Environment overrides for layout settings.
use std::env;
use std::path::PathBuf;

use map_core::{LayoutConfig, StrategyKind};

/// Settings read from the environment (and `.env`).
///
/// They sit between the game's `layout.toml` and command-line flags:
/// file < environment < flags.
#[derive(Clone, Debug, Default)]
pub struct AtlasConfig {
    pub strategy: Option<StrategyKind>,
    pub min_distance: Option<f64>,
    pub max_steps: Option<usize>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl AtlasConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ATLAS_STRATEGY` - Layout strategy (`depth`, `force`, `axis`)
    /// - `ATLAS_MIN_DISTANCE` - Minimum room spacing in percent
    /// - `ATLAS_MAX_STEPS` - Force simulation step ceiling
    /// - `ATLAS_SEED` - Seed for jitter and tie-breaking
    /// - `ATLAS_LOG_DIR` - Directory for `--log` output
    ///
    /// Values that do not parse are ignored.
    pub fn from_env() -> Self {
        Self {
            strategy: read_env("ATLAS_STRATEGY"),
            min_distance: read_env("ATLAS_MIN_DISTANCE"),
            max_steps: read_env("ATLAS_MAX_STEPS"),
            seed: read_env("ATLAS_SEED"),
            log_dir: env::var_os("ATLAS_LOG_DIR").map(PathBuf::from),
        }
    }

    /// Applies the overrides that are set on top of `config`.
    pub fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        if let Some(min_distance) = self.min_distance {
            config = config.with_min_distance(min_distance);
        }
        if let Some(max_steps) = self.max_steps {
            config = config.with_max_steps(max_steps);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_overrides_keep_file_values() {
        let file = LayoutConfig::default().with_min_distance(11.0);
        assert_eq!(AtlasConfig::default().apply(file.clone()), file);
    }

    #[test]
    fn overrides_replace_file_values() {
        let overrides = AtlasConfig {
            strategy: Some(StrategyKind::ForceDirected),
            min_distance: Some(5.0),
            max_steps: Some(40),
            seed: Some(9),
            log_dir: None,
        };
        let config = overrides.apply(LayoutConfig::default());

        assert_eq!(config.strategy, StrategyKind::ForceDirected);
        assert_eq!(config.spacing.min_distance, 5.0);
        assert_eq!(config.force.max_steps, 40);
        assert_eq!(config.grid.seed, 9);
    }
}
