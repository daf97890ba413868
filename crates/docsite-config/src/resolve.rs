//! Build-time check that configured references exist on disk.
//!
//! The site generator performs the same checks when it builds; running
//! them here reports every problem at once, in declaration order.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::sidebar::{self, SidebarEntry};
use crate::site::SiteConfig;

/// Extensions of content pages.
const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A reference that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// An internal sidebar link with no matching page.
    MissingPage { at: String, link: String },
    /// An autogenerate group whose directory does not exist.
    MissingDirectory { at: String, directory: PathBuf },
    MissingStylesheet(PathBuf),
    MissingLogo(PathBuf),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPage { at, link } => write!(f, "{}: no page for link '{}'", at, link),
            Self::MissingDirectory { at, directory } => {
                write!(f, "{}: directory not found: {}", at, directory.display())
            }
            Self::MissingStylesheet(path) => write!(f, "stylesheet not found: {}", path.display()),
            Self::MissingLogo(path) => write!(f, "logo not found: {}", path.display()),
        }
    }
}

/// Pages found under an autogenerate directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGroup {
    pub label: String,
    pub directory: PathBuf,
    pub pages: usize,
}

/// Outcome of [`check_references`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    pub problems: Vec<Problem>,
    pub groups: Vec<GeneratedGroup>,
}

impl ReferenceReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check sidebar links, autogenerate directories, stylesheets and the logo
/// against a project checkout rooted at `project_root`.
pub fn check_references(config: &SiteConfig, project_root: &Path) -> ReferenceReport {
    let content_dir = project_root.join(config.content_dir());
    let mut report = ReferenceReport::default();

    check_sidebar(config.sidebar(), "sidebar", &content_dir, &mut report);

    for stylesheet in &config.assets().stylesheets {
        if !project_root.join(stylesheet).is_file() {
            report
                .problems
                .push(Problem::MissingStylesheet(stylesheet.clone()));
        }
    }

    if let Some(logo) = &config.assets().logo {
        if !project_root.join(&logo.src).is_file() {
            report.problems.push(Problem::MissingLogo(logo.src.clone()));
        }
    }

    report
}

fn check_sidebar(
    entries: &[SidebarEntry],
    prefix: &str,
    content_dir: &Path,
    report: &mut ReferenceReport,
) {
    for (i, entry) in entries.iter().enumerate() {
        let at = format!("{}[{}]", prefix, i);

        match entry {
            SidebarEntry::Link(l) => {
                if sidebar::is_external(&l.link) {
                    continue;
                }
                if find_page(content_dir, &l.link).is_none() {
                    report.problems.push(Problem::MissingPage {
                        at,
                        link: l.link.clone(),
                    });
                }
            }
            SidebarEntry::Autogenerate(g) => {
                let dir = content_dir.join(&g.autogenerate.directory);
                if !dir.is_dir() {
                    report.problems.push(Problem::MissingDirectory {
                        at,
                        directory: dir,
                    });
                    continue;
                }

                let pages = count_pages(&dir);
                if pages == 0 {
                    tracing::warn!("{} ({}) contains no pages", at, dir.display());
                }
                report.groups.push(GeneratedGroup {
                    label: g.label.clone(),
                    directory: dir,
                    pages,
                });
            }
            SidebarEntry::Group(g) => {
                check_sidebar(&g.items, &format!("{}.items", at), content_dir, report);
            }
        }
    }
}

/// Find the page an internal link points at.
///
/// `/resume` matches `resume.md`, `resume.mdx`, `resume/index.md` or
/// `resume/index.mdx`; `/` matches `index.md` or `index.mdx`.
pub fn find_page(content_dir: &Path, link: &str) -> Option<PathBuf> {
    let path = link.split(['#', '?']).next().unwrap_or(link);
    let slug = path.trim_matches('/');

    let mut candidates = Vec::new();
    for ext in PAGE_EXTENSIONS {
        if slug.is_empty() {
            candidates.push(content_dir.join(format!("index.{}", ext)));
        } else {
            candidates.push(content_dir.join(format!("{}.{}", slug, ext)));
            candidates.push(content_dir.join(slug).join(format!("index.{}", ext)));
        }
    }

    candidates.into_iter().find(|c| c.is_file())
}

fn count_pages(dir: &Path) -> usize {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Assembler, SiteDeclaration};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const SITE: &str = r#"
site_url = "https://evotianusx.github.io"
title = "Evotianus Page"

[[sidebar]]
label = "Home"
link = "/"

[[sidebar]]
label = "Resume"
link = "/resume"

[[sidebar]]
label = "Projects"
autogenerate = { directory = "projects" }

[[sidebar]]
label = "GitHub"
link = "https://github.com/evotianusx"

[assets]
stylesheets = ["./src/styles/custom.css"]
logo = { src = "./src/assets/logo.png" }
"#;

    fn config() -> SiteConfig {
        Assembler::new(SiteDeclaration::from_toml_str(SITE).unwrap())
            .assemble()
            .unwrap()
    }

    #[test]
    fn resolves_complete_project() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let docs = root.join("src/content/docs");
        fs::create_dir_all(docs.join("projects/mcp")).unwrap();
        fs::create_dir_all(root.join("src/styles")).unwrap();
        fs::create_dir_all(root.join("src/assets")).unwrap();
        fs::write(docs.join("index.mdx"), "---\ntitle: Home\n---\n").unwrap();
        fs::write(docs.join("resume.md"), "# Resume").unwrap();
        fs::write(docs.join("projects/led.md"), "# LED").unwrap();
        fs::write(docs.join("projects/mcp/index.mdx"), "# MCP").unwrap();
        fs::write(docs.join("projects/mcp/main.py"), "print()").unwrap();
        fs::write(root.join("src/styles/custom.css"), "body{}").unwrap();
        fs::write(root.join("src/assets/logo.png"), [0u8; 4]).unwrap();

        let report = check_references(&config(), root);

        assert!(report.is_ok(), "{:?}", report.problems);
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].pages, 2);
    }

    #[test]
    fn reports_every_missing_reference() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let docs = root.join("src/content/docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("index.md"), "# Home").unwrap();

        let report = check_references(&config(), root);

        assert_eq!(
            report.problems,
            vec![
                Problem::MissingPage {
                    at: "sidebar[1]".to_string(),
                    link: "/resume".to_string()
                },
                Problem::MissingDirectory {
                    at: "sidebar[2]".to_string(),
                    directory: docs.join("projects")
                },
                Problem::MissingStylesheet(PathBuf::from("./src/styles/custom.css")),
                Problem::MissingLogo(PathBuf::from("./src/assets/logo.png")),
            ]
        );
    }

    #[test]
    fn finds_nested_index_pages_and_ignores_fragments() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("resume")).unwrap();
        fs::write(temp.path().join("resume/index.md"), "").unwrap();

        assert!(find_page(temp.path(), "/resume/#work").is_some());
        assert!(find_page(temp.path(), "/").is_none());
    }
}
