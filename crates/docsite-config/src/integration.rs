//! Integrations (plugins) activated by the site generator.
//!
//! Integrations are opaque: the assembler infers a kind from well-known
//! packages, fixes the activation order and forwards the options bag
//! untouched.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Package of the documentation theme used when nothing is declared.
pub const DEFAULT_THEME: &str = "@astrojs/starlight";

/// Package of the CSS-utility integration used when nothing is declared.
pub const DEFAULT_CSS_UTILITY: &str = "@astrojs/tailwind";

/// Identifiers the emitted site module already binds.
const RESERVED_NAMES: &[&str] = &["defineConfig", "passthroughImageService"];

/// JavaScript reserved words, which cannot name an import binding.
const JS_RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Role an integration plays in the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationKind {
    /// Renders documentation pages; receives the site's docs options.
    DocumentationTheme,
    CssUtility,
    /// UI component framework. Must be registered before the theme.
    ComponentFramework,
    Mdx,
    Other,
}

impl IntegrationKind {
    /// Infer the kind of a well-known package.
    pub fn infer(package: &str) -> Self {
        match package {
            "@astrojs/starlight" => Self::DocumentationTheme,
            "@astrojs/tailwind" => Self::CssUtility,
            "@astrojs/react" | "@astrojs/preact" | "@astrojs/vue" | "@astrojs/svelte"
            | "@astrojs/solid-js" | "@astrojs/lit" | "@astrojs/alpinejs" => {
                Self::ComponentFramework
            }
            "@astrojs/mdx" => Self::Mdx,
            _ => Self::Other,
        }
    }
}

/// An integration as written in a declaration: either a bare package
/// specifier or a table with explicit fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegrationDecl {
    Package(String),
    Detailed(DetailedIntegration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedIntegration {
    pub package: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<IntegrationKind>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl From<&str> for IntegrationDecl {
    fn from(package: &str) -> Self {
        Self::Package(package.to_string())
    }
}

/// A resolved integration handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationRef {
    /// Module specifier the integration is imported from.
    pub package: String,
    /// Local identifier the integration's factory is bound to.
    pub name: String,
    pub kind: IntegrationKind,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

/// Integrations used when no layer declares any.
pub fn defaults() -> Vec<IntegrationDecl> {
    vec![DEFAULT_THEME.into(), DEFAULT_CSS_UTILITY.into()]
}

/// Resolve declared integrations into ordered handles.
pub fn resolve(decls: &[IntegrationDecl]) -> Result<Vec<IntegrationRef>, ConfigError> {
    let mut refs = Vec::with_capacity(decls.len());
    let mut packages = HashSet::new();
    let mut names = HashSet::new();

    for decl in decls {
        let package = match decl {
            IntegrationDecl::Package(package) => package,
            IntegrationDecl::Detailed(d) => &d.package,
        };
        validate_package(package)?;

        let integration = match decl {
            IntegrationDecl::Package(package) => IntegrationRef {
                package: package.clone(),
                name: import_name(package),
                kind: IntegrationKind::infer(package),
                options: Map::new(),
            },
            IntegrationDecl::Detailed(d) => IntegrationRef {
                package: d.package.clone(),
                name: d.name.clone().unwrap_or_else(|| import_name(&d.package)),
                kind: d.kind.unwrap_or_else(|| IntegrationKind::infer(&d.package)),
                options: d.options.clone(),
            },
        };

        if !is_identifier(&integration.name) || RESERVED_NAMES.contains(&integration.name.as_str())
        {
            return Err(ConfigError::InvalidIdentifier(integration.name));
        }
        if !packages.insert(integration.package.clone()) {
            return Err(ConfigError::DuplicateIntegration(integration.package));
        }
        if !names.insert(integration.name.clone()) {
            return Err(ConfigError::DuplicateIntegration(integration.name));
        }

        refs.push(integration);
    }

    let mut themes = refs
        .iter()
        .filter(|i| i.kind == IntegrationKind::DocumentationTheme);
    match (themes.next(), themes.next()) {
        (None, _) => return Err(ConfigError::MissingTheme),
        (Some(a), Some(b)) => {
            return Err(ConfigError::MultipleThemes(a.package.clone(), b.package.clone()))
        }
        _ => {}
    }

    Ok(order(refs))
}

/// Move component frameworks declared after the theme to directly before it.
///
/// Relative order within each kind is kept, so the result is a pure
/// function of the input.
fn order(refs: Vec<IntegrationRef>) -> Vec<IntegrationRef> {
    let Some(theme_pos) = refs
        .iter()
        .position(|i| i.kind == IntegrationKind::DocumentationTheme)
    else {
        return refs;
    };

    let late = refs[theme_pos + 1..]
        .iter()
        .any(|i| i.kind == IntegrationKind::ComponentFramework);
    if !late {
        return refs;
    }

    let mut before = Vec::with_capacity(refs.len());
    let mut moved = Vec::new();
    let mut after = Vec::new();

    for (i, integration) in refs.into_iter().enumerate() {
        if i < theme_pos {
            before.push(integration);
        } else if i > theme_pos && integration.kind == IntegrationKind::ComponentFramework {
            tracing::warn!(
                "Moving component framework {} ahead of the documentation theme",
                integration.package
            );
            moved.push(integration);
        } else {
            after.push(integration);
        }
    }

    before.extend(moved);
    before.extend(after);
    before
}

/// Check that a package specifier can be quoted in an emitted module.
///
/// Specifiers are npm names or relative paths; quotes, backslashes,
/// whitespace and control characters never appear in either.
pub fn validate_package(package: &str) -> Result<(), ConfigError> {
    let bad = package.is_empty()
        || package
            .chars()
            .any(|c| matches!(c, '\'' | '"' | '`' | '\\') || c.is_whitespace() || c.is_control());
    if bad {
        return Err(ConfigError::InvalidPackage(package.to_string()));
    }
    Ok(())
}

/// Derive an import identifier from a package specifier.
///
/// `@astrojs/solid-js` becomes `solidJs`, `astro-icon` becomes `astroIcon`.
pub fn import_name(package: &str) -> String {
    let last = package.rsplit('/').next().unwrap_or(package);

    let mut name = String::new();
    for (i, part) in last
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|p| !p.is_empty())
        .enumerate()
    {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                name.push(first.to_ascii_lowercase());
            } else {
                name.push(first.to_ascii_uppercase());
            }
            name.push_str(chars.as_str());
        }
    }

    if name.is_empty() {
        return "integration".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) || is_reserved_word(&name) {
        name.insert(0, '_');
    }
    name
}

/// Whether `name` can be used as a binding in an ES module.
pub fn is_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"))
        .is_match(name)
        && !is_reserved_word(name)
}

fn is_reserved_word(name: &str) -> bool {
    JS_RESERVED_WORDS.contains(&name)
}
