//! CSS-utility framework configuration.
//!
//! # Example
//!
//! ```toml
//! [css]
//! content = ["./src/**/*.{astro,md,mdx}"]
//! plugins = ["@astrojs/starlight-tailwind"]
//! theme_extend = { colors = { accent = "#7c3aed" } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::integration;

/// Content globs scanned for utility classes when none are declared.
pub const DEFAULT_CONTENT: &str = "./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}";

/// Plugin that bridges the utility framework and the documentation theme.
pub const DEFAULT_PLUGIN: &str = "@astrojs/starlight-tailwind";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CssUtilityConfig {
    /// Glob patterns of files scanned for class names.
    pub content: Vec<String>,

    /// Plugin packages, each called with no arguments.
    pub plugins: Vec<String>,

    /// Opaque `theme.extend` object.
    #[serde(alias = "themeExtend")]
    pub theme_extend: Map<String, Value>,
}

impl Default for CssUtilityConfig {
    fn default() -> Self {
        Self {
            content: vec![DEFAULT_CONTENT.to_string()],
            plugins: vec![DEFAULT_PLUGIN.to_string()],
            theme_extend: Map::new(),
        }
    }
}

impl CssUtilityConfig {
    /// Check that every plugin specifier can be quoted in the emitted module.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plugins
            .iter()
            .try_for_each(|plugin| integration::validate_package(plugin))
    }
}
