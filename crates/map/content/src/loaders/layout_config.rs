//! Layout configuration loader.

use std::path::Path;

use anyhow::Context;
use map_core::LayoutConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for layout configuration from TOML files.
///
/// Every section and key is optional:
///
/// ```toml
/// strategy = "force"
///
/// [spacing]
/// min_distance = 10.0
///
/// [force]
/// max_steps = 300
/// ```
pub struct LayoutConfigLoader;

impl LayoutConfigLoader {
    /// Load and validate a layout config.
    pub fn load(path: &Path) -> LoadResult<LayoutConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load layout config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> LoadResult<LayoutConfig> {
        let config: LayoutConfig =
            toml::from_str(content).context("Failed to parse layout config TOML")?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use map_core::StrategyKind;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = LayoutConfigLoader::from_toml_str(
            r#"
            strategy = "force"

            [spacing]
            min_distance = 12.5

            [force]
            max_steps = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, StrategyKind::ForceDirected);
        assert_eq!(config.spacing.min_distance, 12.5);
        assert_eq!(config.force.max_steps, 300);
        assert_eq!(config.force.damping, LayoutConfig::default().force.damping);
        assert_eq!(config.canvas, LayoutConfig::default().canvas);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(
            LayoutConfigLoader::from_toml_str("").unwrap(),
            LayoutConfig::default()
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = LayoutConfigLoader::from_toml_str("[force]\ndamping = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("damping"), "{err}");
    }
}
