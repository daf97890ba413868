//! Initialize a site declaration and content tree.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docsite...");

    let root = super::project_root(config_path);
    let docs_dir = root.join("src/content/docs");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    fs::create_dir_all(docs_dir.join("projects"))
        .context("Failed to create content directory")?;
    fs::create_dir_all(root.join("src/styles")).context("Failed to create styles directory")?;

    let files = [
        (docs_dir.join("index.mdx"), DEFAULT_INDEX),
        (docs_dir.join("resume.md"), DEFAULT_RESUME),
        (docs_dir.join("projects/first-project.md"), DEFAULT_PROJECT),
        (root.join("src/styles/custom.css"), DEFAULT_CSS),
    ];

    for (path, contents) in files {
        if path.exists() && !yes {
            continue;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docsite check' and then 'docsite build'.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docsite configuration

# Absolute URL the site is deployed at
site_url = "https://example.github.io"

# Site title
title = "My Page"

# "default" optimizes images, "passthrough" serves them unmodified
image_service = "passthrough"

# Integrations in activation order. Component frameworks go before the theme.
integrations = [
  "@astrojs/react",
  "@astrojs/starlight",
  "@astrojs/tailwind",
  "@astrojs/mdx",
]

[[social]]
icon = "github"
label = "GitHub"
href = "https://github.com/example"

[[sidebar]]
label = "Home"
link = "/"

[[sidebar]]
label = "Resume"
link = "/resume"

[[sidebar]]
label = "Projects"
autogenerate = { directory = "projects" }

[assets]
stylesheets = ["./src/styles/custom.css"]

[css]
content = ["./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}"]
plugins = ["@astrojs/starlight-tailwind"]
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
description: Personal documentation and portfolio
---

Notes, projects and a resume, in one place.
"#;

const DEFAULT_RESUME: &str = r#"---
title: Resume
---

## Experience
"#;

const DEFAULT_PROJECT: &str = r#"---
title: First Project
---

Pages in `src/content/docs/projects/` appear under **Projects** in the sidebar.
"#;

const DEFAULT_CSS: &str = r#"@tailwind base;
@tailwind components;
@tailwind utilities;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_config::{check_references, Assembler, SiteDeclaration};
    use tempfile::tempdir;

    #[test]
    fn starter_project_assembles_and_resolves() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docsite.toml");

        run(&config_path, false).unwrap();

        let decl = SiteDeclaration::from_path(&config_path).unwrap();
        let config = Assembler::new(decl).assemble().unwrap();
        let report = check_references(&config, temp.path());

        assert!(report.is_ok(), "{:?}", report.problems);
        assert_eq!(report.groups[0].pages, 1);
    }

    #[test]
    fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docsite.toml");
        fs::write(&config_path, "title = \"Mine\"").unwrap();

        run(&config_path, false).unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "title = \"Mine\"");
    }
}
