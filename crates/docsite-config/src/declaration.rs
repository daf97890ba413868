//! Declarations as written by the site author.
//!
//! A declaration is one layer of configuration. Every field is optional so
//! that overlay layers only need to name what they change.
//!
//! ```toml
//! site_url = "https://evotianusx.github.io"
//! title = "Evotianus Page"
//!
//! [social]
//! github = "https://github.com/evotianusx"
//!
//! [[sidebar]]
//! label = "Home"
//! link = "/"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assets::CustomAssets;
use crate::css::CssUtilityConfig;
use crate::error::ConfigError;
use crate::head::HeadInjection;
use crate::integration::IntegrationDecl;
use crate::sidebar::SidebarEntry;
use crate::site::ImageService;

/// File formats a declaration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// One layer of site declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDeclaration {
    /// Absolute URL the site is deployed at.
    #[serde(default, alias = "site", alias = "siteUrl")]
    pub site_url: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, alias = "imageService")]
    pub image_service: Option<ImageService>,

    #[serde(default, alias = "contentDir")]
    pub content_dir: Option<PathBuf>,

    #[serde(default)]
    pub sidebar: Option<Vec<SidebarEntry>>,

    /// Social links in either the mapping or the list encoding.
    /// Normalized during assembly.
    #[serde(default)]
    pub social: Option<Value>,

    #[serde(default)]
    pub integrations: Option<Vec<IntegrationDecl>>,

    #[serde(default)]
    pub assets: Option<CustomAssets>,

    #[serde(default)]
    pub head: Option<Vec<HeadInjection>>,

    #[serde(default)]
    pub css: Option<CssUtilityConfig>,
}

impl SiteDeclaration {
    /// Read a declaration from a file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let declaration = Self::parse(&source, format, &path.display().to_string())?;
        tracing::debug!("Loaded declarations from {}", path.display());
        Ok(declaration)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source, Format::Toml, "<toml>")
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source, Format::Yaml, "<yaml>")
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source, Format::Json, "<json>")
    }

    fn parse(source: &str, format: Format, origin: &str) -> Result<Self, ConfigError> {
        let parsed = match format {
            Format::Toml => toml::from_str(source).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(source).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: origin.to_string(),
            message,
        })
    }

    /// Apply `overlay` on top of `self`.
    ///
    /// Each field the overlay declares replaces the base field wholesale;
    /// lists and option bags are not merged element-wise.
    pub fn merge(self, overlay: SiteDeclaration) -> SiteDeclaration {
        SiteDeclaration {
            site_url: overlay.site_url.or(self.site_url),
            title: overlay.title.or(self.title),
            image_service: overlay.image_service.or(self.image_service),
            content_dir: overlay.content_dir.or(self.content_dir),
            sidebar: overlay.sidebar.or(self.sidebar),
            social: overlay.social.or(self.social),
            integrations: overlay.integrations.or(self.integrations),
            assets: overlay.assets.or(self.assets),
            head: overlay.head.or(self.head),
            css: overlay.css.or(self.css),
        }
    }
}
