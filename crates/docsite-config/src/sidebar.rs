//! Sidebar navigation entries.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single sidebar entry. Entries render in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// A direct link to a page or an external URL.
    Link(SidebarLink),
    /// A group whose children are generated from a content directory.
    Autogenerate(AutogenerateGroup),
    /// A group with explicitly listed children.
    Group(SidebarGroup),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarLink {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutogenerateGroup {
    pub label: String,
    pub autogenerate: Autogenerate,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Autogenerate {
    /// Directory relative to the content root.
    #[serde(alias = "sourceDirectory", alias = "source_directory")]
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub label: String,
    pub items: Vec<SidebarEntry>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SidebarEntry {
    /// Create a direct link entry.
    pub fn link(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Link(SidebarLink {
            label: label.into(),
            link: link.into(),
        })
    }

    /// Create an autogenerated group entry.
    pub fn autogenerate(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self::Autogenerate(AutogenerateGroup {
            label: label.into(),
            autogenerate: Autogenerate {
                directory: directory.into(),
            },
            collapsed: false,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Link(l) => &l.label,
            Self::Autogenerate(g) => &g.label,
            Self::Group(g) => &g.label,
        }
    }
}

/// Validate sidebar entries recursively.
///
/// Checks are purely lexical; whether links and directories exist on disk
/// is answered by [`crate::resolve`].
pub fn validate(entries: &[SidebarEntry]) -> Result<(), ConfigError> {
    validate_at(entries, "sidebar")
}

fn validate_at(entries: &[SidebarEntry], prefix: &str) -> Result<(), ConfigError> {
    for (i, entry) in entries.iter().enumerate() {
        let at = format!("{}[{}]", prefix, i);

        if entry.label().trim().is_empty() {
            return Err(ConfigError::EmptyLabel { at });
        }

        match entry {
            SidebarEntry::Link(l) => {
                if !is_valid_link(&l.link) {
                    return Err(ConfigError::InvalidLink {
                        at,
                        link: l.link.clone(),
                    });
                }
            }
            SidebarEntry::Autogenerate(g) => {
                if !is_valid_directory(&g.autogenerate.directory) {
                    return Err(ConfigError::InvalidDirectory {
                        at,
                        directory: g.autogenerate.directory.clone(),
                    });
                }
            }
            SidebarEntry::Group(g) => {
                validate_at(&g.items, &format!("{}.items", at))?;
            }
        }
    }

    Ok(())
}

/// Whether a link points outside the site.
pub fn is_external(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

fn is_valid_link(link: &str) -> bool {
    if link.starts_with('/') {
        return !link.starts_with("//");
    }

    is_external(link) && url::Url::parse(link).is_ok()
}

fn is_valid_directory(directory: &str) -> bool {
    let trimmed = directory.trim();
    if trimmed.is_empty() {
        return false;
    }

    Path::new(trimmed)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
