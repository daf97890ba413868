//! Assembles declaration layers into one [`SiteConfig`].

use std::path::PathBuf;

use url::Url;

use crate::declaration::SiteDeclaration;
use crate::error::ConfigError;
use crate::site::{SiteConfig, DEFAULT_CONTENT_DIR};
use crate::{head, integration, sidebar, social};

/// Builds a [`SiteConfig`] from a base declaration, override layers and
/// explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    layers: Vec<SiteDeclaration>,
    site_url: Option<String>,
    title: Option<String>,
}

impl Assembler {
    /// Start from a base declaration.
    pub fn new(base: SiteDeclaration) -> Self {
        Self {
            layers: vec![base],
            ..Default::default()
        }
    }

    /// Push an override layer. Later layers win.
    pub fn layer(mut self, overlay: SiteDeclaration) -> Self {
        self.layers.push(overlay);
        self
    }

    /// Override the site URL after all layers are applied.
    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into());
        self
    }

    /// Override the title after all layers are applied.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Merge, normalize and validate.
    pub fn assemble(&self) -> Result<SiteConfig, ConfigError> {
        let merged = self
            .layers
            .iter()
            .cloned()
            .fold(SiteDeclaration::default(), SiteDeclaration::merge);

        tracing::debug!("Merged {} declaration layer(s)", self.layers.len());

        let raw_url = self
            .site_url
            .clone()
            .or(merged.site_url)
            .ok_or(ConfigError::Missing("site_url"))?;
        let site_url = parse_site_url(&raw_url)?;

        let title = self
            .title
            .clone()
            .or(merged.title)
            .ok_or(ConfigError::Missing("title"))?;
        if title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }

        let sidebar = merged.sidebar.unwrap_or_default();
        sidebar::validate(&sidebar)?;

        let social = match &merged.social {
            Some(raw) => social::normalize(raw)?,
            None => Vec::new(),
        };

        let integrations = match &merged.integrations {
            Some(decls) => integration::resolve(decls)?,
            None => integration::resolve(&integration::defaults())?,
        };

        let head = merged.head.unwrap_or_default();
        head::validate(&head)?;

        let css = merged.css.unwrap_or_default();
        css.validate()?;

        let config = SiteConfig {
            site_url,
            title,
            image_service: merged.image_service.unwrap_or_default(),
            content_dir: merged
                .content_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
            sidebar,
            social,
            integrations,
            assets: merged.assets.unwrap_or_default(),
            head,
            css,
        };

        tracing::debug!(
            "Assembled {} with {} sidebar entries, {} integrations",
            config.site_url,
            config.sidebar.len(),
            config.integrations.len()
        );

        Ok(config)
    }
}

fn parse_site_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("scheme '{}' is not http or https", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::emit::to_canonical_json;
    use crate::integration::IntegrationKind;
    use crate::sidebar::SidebarEntry;
    use crate::site::ImageService;
    use crate::social::Platform;
    use pretty_assertions::assert_eq;

    /// The site as it looks after its last revision: list-form social
    /// links, custom CSS, a logo, an analytics script and extra integrations.
    const LATEST: &str = r#"
site_url = "https://evotianusx.github.io"
title = "Evotianus Page"
image_service = "passthrough"
integrations = ["@astrojs/react", "@astrojs/starlight", "@astrojs/tailwind", "@astrojs/mdx"]

[[social]]
icon = "github"
label = "GitHub"
href = "https://github.com/evotianusx"

[[social]]
icon = "linkedin"
label = "LinkedIn"
href = "https://www.linkedin.com/in/evotianusb"

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
logo = { src = "./src/assets/logo.png" }

[[head]]
tag = "meta"
attrs = { name = "author", content = "Evotianus" }

[[head]]
tag = "script"
attrs = { src = "https://scripts.withcabin.com/hello.js", defer = true, async = true }
"#;

    fn latest() -> SiteDeclaration {
        SiteDeclaration::from_toml_str(LATEST).unwrap()
    }

    #[test]
    fn assembles_latest_version() {
        let config = Assembler::new(latest()).assemble().unwrap();

        assert_eq!(config.site_url().as_str(), "https://evotianusx.github.io/");
        assert_eq!(config.title(), "Evotianus Page");
        assert_eq!(config.image_service(), ImageService::Passthrough);
        assert!(!config.image_service().processes_images());
        assert_eq!(config.social()[1].platform, Platform::Linkedin);
        assert_eq!(config.assets().stylesheets.len(), 1);
        assert_eq!(config.theme().map(|t| t.name.as_str()), Some("starlight"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let first = to_canonical_json(&Assembler::new(latest()).assemble().unwrap()).unwrap();
        let second = to_canonical_json(&Assembler::new(latest()).assemble().unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn preserves_sidebar_order() {
        let config = Assembler::new(latest()).assemble().unwrap();

        let labels: Vec<&str> = config.sidebar().iter().map(SidebarEntry::label).collect();
        assert_eq!(labels, vec!["Home", "Resume", "Projects"]);
    }

    #[test]
    fn preserves_head_injection_position() {
        let config = Assembler::new(latest()).assemble().unwrap();

        assert_eq!(config.head()[0].tag, "meta");
        assert_eq!(
            config.head()[1].to_html(),
            r#"<script src="https://scripts.withcabin.com/hello.js" defer async></script>"#
        );
    }

    #[test]
    fn keeps_component_framework_before_theme() {
        let config = Assembler::new(latest()).assemble().unwrap();

        let kinds: Vec<IntegrationKind> = config.integrations().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IntegrationKind::ComponentFramework,
                IntegrationKind::DocumentationTheme,
                IntegrationKind::CssUtility,
                IntegrationKind::Mdx,
            ]
        );
    }

    #[test]
    fn applies_defaults_for_minimal_declaration() {
        let decl = SiteDeclaration::from_toml_str(
            "site_url = \"https://example.com\"\ntitle = \"Docs\"",
        )
        .unwrap();

        let config = Assembler::new(decl).assemble().unwrap();

        assert_eq!(config.image_service(), ImageService::Default);
        assert!(config.image_service().processes_images());
        assert_eq!(config.content_dir(), Path::new(DEFAULT_CONTENT_DIR));
        assert!(config.sidebar().is_empty());
        assert!(config.social().is_empty());
        let packages: Vec<&str> = config.integrations().iter().map(|i| i.package.as_str()).collect();
        assert_eq!(packages, vec!["@astrojs/starlight", "@astrojs/tailwind"]);
    }

    #[test]
    fn later_layers_and_overrides_win() {
        let overlay = SiteDeclaration::from_toml_str(
            "title = \"Staging\"\nimage_service = \"default\"",
        )
        .unwrap();

        let config = Assembler::new(latest())
            .layer(overlay)
            .site_url("https://staging.example.com")
            .assemble()
            .unwrap();

        assert_eq!(config.title(), "Staging");
        assert_eq!(config.image_service(), ImageService::Default);
        assert_eq!(config.site_url().host_str(), Some("staging.example.com"));
        assert_eq!(config.sidebar().len(), 3);
    }

    #[test]
    fn requires_url_and_title() {
        let no_url = SiteDeclaration {
            title: Some("Docs".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Assembler::new(no_url).assemble(),
            Err(ConfigError::Missing("site_url"))
        ));

        let blank_title = SiteDeclaration {
            site_url: Some("https://example.com".to_string()),
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Assembler::new(blank_title).assemble(),
            Err(ConfigError::EmptyTitle)
        ));
    }

    #[test]
    fn rejects_non_absolute_site_urls() {
        for bad in ["evotianusx.github.io", "ftp://example.com", "mailto:me@example.com"] {
            let result = Assembler::default().site_url(bad).title("Docs").assemble();
            assert!(
                matches!(result, Err(ConfigError::InvalidUrl { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn surfaces_social_and_integration_errors() {
        let dup = SiteDeclaration::from_toml_str(
            r#"
site_url = "https://example.com"
title = "Docs"
social = [
  { icon = "github", href = "https://github.com/a" },
  { icon = "github", href = "https://github.com/b" },
]
"#,
        )
        .unwrap();
        assert!(matches!(
            Assembler::new(dup).assemble(),
            Err(ConfigError::DuplicatePlatform(_))
        ));

        let themeless = SiteDeclaration::from_toml_str(
            "site_url = \"https://example.com\"\ntitle = \"Docs\"\nintegrations = [\"@astrojs/mdx\"]",
        )
        .unwrap();
        assert!(matches!(
            Assembler::new(themeless).assemble(),
            Err(ConfigError::MissingTheme)
        ));
    }

    #[test]
    fn rejects_unquotable_packages_and_reserved_names() {
        let quoted = SiteDeclaration::from_toml_str(
            r#"
site_url = "https://example.com"
title = "Docs"
integrations = ["@astrojs/starlight", "a'b"]
"#,
        )
        .unwrap();
        assert!(matches!(
            Assembler::new(quoted).assemble(),
            Err(ConfigError::InvalidPackage(p)) if p == "a'b"
        ));

        let plugin = SiteDeclaration::from_toml_str(
            r#"
site_url = "https://example.com"
title = "Docs"

[css]
plugins = ["x'); process.exit(1); //"]
"#,
        )
        .unwrap();
        assert!(matches!(
            Assembler::new(plugin).assemble(),
            Err(ConfigError::InvalidPackage(_))
        ));

        let reserved = SiteDeclaration::from_toml_str(
            r#"
site_url = "https://example.com"
title = "Docs"
integrations = ["@astrojs/starlight", { package = "widgets", name = "class" }]
"#,
        )
        .unwrap();
        assert!(matches!(
            Assembler::new(reserved).assemble(),
            Err(ConfigError::InvalidIdentifier(_))
        ));
    }
}
