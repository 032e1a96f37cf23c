//! Map renderers and output helpers.

mod svg;
mod text;

pub use svg::SvgRenderer;
pub use text::TextRenderer;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Writes `content` to `output`, or stdout when no path is given.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
