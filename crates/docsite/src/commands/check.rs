//! Check command: verify configured references exist on disk.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docsite_config::check_references;

/// Run the check command.
pub fn run(config_path: &Path, overlays: &[PathBuf]) -> Result<()> {
    let config = super::assemble(config_path, overlays, None)?;
    let report = check_references(&config, super::project_root(config_path));

    for group in &report.groups {
        tracing::info!(
            "{}: {} page(s) in {}",
            group.label,
            group.pages,
            group.directory.display()
        );
    }

    for problem in &report.problems {
        tracing::error!("{}", problem);
    }

    if !report.is_ok() {
        anyhow::bail!("{} unresolved reference(s)", report.problems.len());
    }

    tracing::info!("All references resolve");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SITE: &str = r#"
site_url = "https://example.com"
title = "Docs"

[[sidebar]]
label = "Home"
link = "/"

[[sidebar]]
label = "Projects"
autogenerate = { directory = "projects" }
"#;

    #[test]
    fn passes_when_every_reference_resolves() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docsite.toml");
        fs::write(&config_path, SITE).unwrap();
        let docs = temp.path().join("src/content/docs");
        fs::create_dir_all(docs.join("projects")).unwrap();
        fs::write(docs.join("index.md"), "# Home").unwrap();
        fs::write(docs.join("projects/led.md"), "# LED").unwrap();

        run(&config_path, &[]).unwrap();
    }

    #[test]
    fn fails_on_missing_directory() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docsite.toml");
        fs::write(&config_path, SITE).unwrap();
        let docs = temp.path().join("src/content/docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("index.md"), "# Home").unwrap();

        let err = run(&config_path, &[]).unwrap_err();

        assert!(err.to_string().contains("1 unresolved reference(s)"));
    }
}
