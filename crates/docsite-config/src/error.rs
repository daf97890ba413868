//! Errors raised while loading and assembling a site configuration.

use std::path::PathBuf;

/// Errors that can occur while building a [`SiteConfig`](crate::SiteConfig).
///
/// Every variant is an authoring mistake in the declarations; none of them
/// is recoverable at build time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported config format: {0} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid site URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("{at}: label must not be empty")]
    EmptyLabel { at: String },

    #[error("{at}: link '{link}' must start with '/' or be an absolute http(s) URL")]
    InvalidLink { at: String, link: String },

    #[error("{at}: autogenerate directory '{directory}' must be a relative path inside the content directory")]
    InvalidDirectory { at: String, directory: String },

    #[error("social[{index}]: {reason}")]
    SocialShape { index: usize, reason: String },

    #[error("Duplicate social link for platform '{0}'")]
    DuplicatePlatform(String),

    #[error("Duplicate integration: {0}")]
    DuplicateIntegration(String),

    #[error("Invalid integration identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("No documentation theme integration configured")]
    MissingTheme,

    #[error("More than one documentation theme integration: {0} and {1}")]
    MultipleThemes(String, String),

    #[error("head[{index}]: unsupported tag '{tag}'")]
    InvalidHeadTag { index: usize, tag: String },

    #[error("head[{index}]: invalid attribute name '{name}'")]
    InvalidAttribute { index: usize, name: String },

    #[error("head[{index}]: attribute '{name}' must be a string or a boolean")]
    InvalidAttributeValue { index: usize, name: String },

    #[error("Invalid package specifier '{0}'")]
    InvalidPackage(String),

    #[error("Failed to render {template}: {message}")]
    Render { template: String, message: String },
}
