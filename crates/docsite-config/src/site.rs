//! The assembled, immutable site configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::assets::CustomAssets;
use crate::css::CssUtilityConfig;
use crate::head::HeadInjection;
use crate::integration::{IntegrationKind, IntegrationRef};
use crate::sidebar::SidebarEntry;
use crate::social::SocialLink;

/// Content root used when no layer declares one.
pub const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// How the site generator treats images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageService {
    /// The generator optimizes images itself.
    #[default]
    Default,
    /// Images are served unmodified.
    Passthrough,
}

impl ImageService {
    /// Whether the generator runs its image optimization pipeline.
    pub fn processes_images(self) -> bool {
        self == Self::Default
    }
}

/// A fully assembled site configuration.
///
/// Built once by [`Assembler::assemble`](crate::Assembler::assemble) and
/// read-only afterwards. Field order here is the canonical output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    pub(crate) site_url: Url,
    pub(crate) title: String,
    pub(crate) image_service: ImageService,
    pub(crate) content_dir: PathBuf,
    pub(crate) sidebar: Vec<SidebarEntry>,
    pub(crate) social: Vec<SocialLink>,
    pub(crate) integrations: Vec<IntegrationRef>,
    pub(crate) assets: CustomAssets,
    pub(crate) head: Vec<HeadInjection>,
    pub(crate) css: CssUtilityConfig,
}

impl SiteConfig {
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_service(&self) -> ImageService {
        self.image_service
    }

    /// Directory sidebar links and autogenerate groups resolve against.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn sidebar(&self) -> &[SidebarEntry] {
        &self.sidebar
    }

    pub fn social(&self) -> &[SocialLink] {
        &self.social
    }

    /// Integrations in activation order.
    pub fn integrations(&self) -> &[IntegrationRef] {
        &self.integrations
    }

    /// The documentation theme. Assembly guarantees exactly one exists.
    pub fn theme(&self) -> Option<&IntegrationRef> {
        self.integrations
            .iter()
            .find(|i| i.kind == IntegrationKind::DocumentationTheme)
    }

    pub fn assets(&self) -> &CustomAssets {
        &self.assets
    }

    /// Head injections in injection order.
    pub fn head(&self) -> &[HeadInjection] {
        &self.head
    }

    pub fn css(&self) -> &CssUtilityConfig {
        &self.css
    }
}
