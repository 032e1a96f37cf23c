//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory for atlas
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/atlas/logs`
/// - Linux: `~/.cache/atlas/logs` (or `$XDG_CACHE_HOME/atlas/logs`)
/// - Windows: `%LOCALAPPDATA%\atlas\logs`
/// - Fallback: `<temp>/atlas/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", "atlas")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("atlas"));

    base_dir.join("logs")
}
