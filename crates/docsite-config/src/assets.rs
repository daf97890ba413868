//! Custom stylesheet and logo paths.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Project-relative asset references. Paths are read-only references into
/// the project; nothing here is copied or written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomAssets {
    /// Stylesheets appended after the theme's own CSS, in order.
    #[serde(alias = "customCss", alias = "custom_css")]
    pub stylesheets: Vec<PathBuf>,

    /// Site logo shown in the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Logo {
    pub src: PathBuf,

    /// Hide the site title next to the logo.
    #[serde(default, alias = "replacesTitle")]
    pub replaces_title: bool,
}

impl CustomAssets {
    pub fn is_empty(&self) -> bool {
        self.stylesheets.is_empty() && self.logo.is_none()
    }
}
