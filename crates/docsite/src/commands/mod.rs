//! Subcommand implementations.

pub mod build;
pub mod check;
pub mod init;
pub mod print;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docsite_config::{Assembler, SiteConfig, SiteDeclaration};

/// Load the base declaration and overlays, then assemble.
pub fn assemble(
    config: &Path,
    overlays: &[PathBuf],
    site_url: Option<String>,
) -> Result<SiteConfig> {
    let base = SiteDeclaration::from_path(config)
        .with_context(|| format!("Failed to load {}", config.display()))?;
    tracing::info!("Loaded config from {}", config.display());

    let mut assembler = Assembler::new(base);
    for overlay in overlays {
        let layer = SiteDeclaration::from_path(overlay)
            .with_context(|| format!("Failed to load overlay {}", overlay.display()))?;
        tracing::info!("Applying overlay {}", overlay.display());
        assembler = assembler.layer(layer);
    }
    if let Some(url) = site_url {
        assembler = assembler.site_url(url);
    }

    assembler
        .assemble()
        .with_context(|| format!("Invalid configuration in {}", config.display()))
}

/// Directory the config file lives in; relative references resolve from here.
pub fn project_root(config: &Path) -> &Path {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
