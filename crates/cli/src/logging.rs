//! Logging setup: stderr always, a log file on request.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AtlasConfig;
use crate::dirs;

const LOG_FILE_NAME: &str = "atlas.log";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// `RUST_LOG` filters both outputs (default `info`). With `--log` the file
/// goes to `ATLAS_LOG_DIR` or the platform log directory; `--log-file`
/// names the file directly. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn setup_logging(
    config: &AtlasConfig,
    log: bool,
    log_file: Option<PathBuf>,
) -> Result<Option<WorkerGuard>> {
    let target = match log_file {
        Some(path) => Some(path),
        None if log => Some(
            config
                .log_dir
                .clone()
                .unwrap_or_else(dirs::log_dir)
                .join(LOG_FILE_NAME),
        ),
        None => None,
    };

    let env_filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &target {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| LOG_FILE_NAME.into());

            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let file_appender = tracing_appender::rolling::never(&dir, file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(path) = &target {
        tracing::info!("Log file: {}", path.display());
    }

    Ok(guard)
}

/// Filter from `RUST_LOG` directives, or `info` when unset, blank or invalid.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_level_is_kept() {
        assert_eq!(env_filter(Some("debug")).to_string(), "debug");
        assert_eq!(env_filter(Some("map_core=trace")).to_string(), "map_core=trace");
    }

    #[test]
    fn missing_or_blank_rust_log_defaults_to_info() {
        assert_eq!(env_filter(None).to_string(), "info");
        assert_eq!(env_filter(Some("  ")).to_string(), "info");
    }
}
