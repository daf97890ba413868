//! Build command: assemble and write the framework entry points.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use docsite_config::Emitter;

/// Run the build command.
pub fn run(
    config_path: &Path,
    overlays: &[PathBuf],
    site_url: Option<String>,
    output: &Path,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!("Assembling site configuration...");

    let config = super::assemble(config_path, overlays, site_url)?;

    let written = Emitter::new()
        .write_all(&config, output)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;

    for path in &written {
        tracing::info!("Wrote {}", path.display());
    }

    tracing::info!(
        "Built {} with {} integrations in {}ms",
        config.site_url(),
        config.integrations().len(),
        start.elapsed().as_millis()
    );

    Ok(())
}
