//! Social links and the two encodings they are declared in.
//!
//! Declarations may list social links either as a mapping from platform
//! name to URL:
//!
//! ```toml
//! [social]
//! github = "https://github.com/evotianusx"
//! linkedin = "https://www.linkedin.com/in/evotianusb"
//! ```
//!
//! or as a list of objects carrying an explicit icon and label:
//!
//! ```toml
//! [[social]]
//! icon = "github"
//! label = "GitHub"
//! href = "https://github.com/evotianusx"
//! ```
//!
//! Both are normalized into the same ordered sequence of [`SocialLink`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Platform a social link points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Github,
    Linkedin,
    Twitter,
    Mastodon,
    Discord,
    Youtube,
    Email,
    Rss,
    /// Any platform without a built-in icon. Stored lowercase.
    Custom(String),
}

impl Platform {
    /// Parse a platform name. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "github" => Self::Github,
            "linkedin" => Self::Linkedin,
            "twitter" | "x" | "x.com" => Self::Twitter,
            "mastodon" => Self::Mastodon,
            "discord" => Self::Discord,
            "youtube" => Self::Youtube,
            "email" | "mail" => Self::Email,
            "rss" => Self::Rss,
            _ => Self::Custom(name.replace(' ', "-")),
        }
    }

    /// Identifier used as the icon name by the documentation theme.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Mastodon => "mastodon",
            Self::Discord => "discord",
            Self::Youtube => "youtube",
            Self::Email => "email",
            Self::Rss => "rss",
            Self::Custom(name) => name,
        }
    }

    /// Human-readable label used when a link declares none.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Mastodon => "Mastodon",
            Self::Discord => "Discord",
            Self::Youtube => "YouTube",
            Self::Email => "Email",
            Self::Rss => "RSS",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized social link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: Platform,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SocialLink {
    /// Icon name handed to the theme.
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or_else(|| self.platform.as_str())
    }

    /// Label handed to the theme.
    pub fn label_or_default(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.platform.display_name())
    }
}

/// Normalize a raw `social` declaration into canonical links.
///
/// `null` yields no links. Platforms must be unique across the result.
pub fn normalize(raw: &Value) -> Result<Vec<SocialLink>, ConfigError> {
    let links = match raw {
        Value::Null => Vec::new(),
        Value::Object(map) => map
            .iter()
            .enumerate()
            .map(|(index, (platform, url))| from_mapping_entry(index, platform, url))
            .collect::<Result<Vec<_>, _>>()?,
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| from_list_entry(index, item))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(ConfigError::SocialShape {
                index: 0,
                reason: format!(
                    "expected a table of platform = url or a list of {{ icon, label, href }}, found {}",
                    value_kind(other)
                ),
            })
        }
    };

    let mut seen = HashSet::new();
    for link in &links {
        if !seen.insert(link.platform.clone()) {
            return Err(ConfigError::DuplicatePlatform(link.platform.to_string()));
        }
    }

    Ok(links)
}

fn from_mapping_entry(index: usize, platform: &str, url: &Value) -> Result<SocialLink, ConfigError> {
    let Value::String(url) = url else {
        return Err(ConfigError::SocialShape {
            index,
            reason: format!(
                "'{}' must map to a URL string, found {}",
                platform,
                value_kind(url)
            ),
        });
    };

    Ok(SocialLink {
        platform: Platform::from_name(platform),
        url: check_url(index, url)?,
        icon: None,
        label: None,
    })
}

fn from_list_entry(index: usize, item: &Value) -> Result<SocialLink, ConfigError> {
    let Value::Object(fields) = item else {
        return Err(ConfigError::SocialShape {
            index,
            reason: format!(
                "list entries must be tables with an href, found {}",
                value_kind(item)
            ),
        });
    };

    for key in fields.keys() {
        if !matches!(key.as_str(), "platform" | "icon" | "label" | "href" | "url") {
            return Err(ConfigError::SocialShape {
                index,
                reason: format!("unknown key '{}'", key),
            });
        }
    }

    let text = |key: &str| -> Result<Option<String>, ConfigError> {
        match fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ConfigError::SocialShape {
                index,
                reason: format!("'{}' must be a string, found {}", key, value_kind(other)),
            }),
        }
    };

    let icon = text("icon")?;
    let label = text("label")?;
    let url = match (text("href")?, text("url")?) {
        (Some(href), None) | (None, Some(href)) => href,
        (Some(_), Some(_)) => {
            return Err(ConfigError::SocialShape {
                index,
                reason: "'href' and 'url' are the same field; give only one".to_string(),
            })
        }
        (None, None) => {
            return Err(ConfigError::SocialShape {
                index,
                reason: "missing 'href'".to_string(),
            })
        }
    };

    let platform = text("platform")?
        .or_else(|| icon.clone())
        .or_else(|| label.clone())
        .filter(|name| !name.trim().is_empty())
        .map(|name| Platform::from_name(&name))
        .ok_or_else(|| ConfigError::SocialShape {
            index,
            reason: "an icon or label is required to identify the platform".to_string(),
        })?;

    Ok(SocialLink {
        platform,
        url: check_url(index, &url)?,
        icon,
        label,
    })
}

/// URL schemes a social link may use.
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn check_url(index: usize, url: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(url.trim()).map_err(|e| ConfigError::SocialShape {
        index,
        reason: format!("'{}' is not an absolute URL: {}", url, e),
    })?;
    if !LINK_SCHEMES.contains(&parsed.scheme()) {
        return Err(ConfigError::SocialShape {
            index,
            reason: format!(
                "'{}' uses scheme '{}', expected http, https or mailto",
                url,
                parsed.scheme()
            ),
        });
    }
    Ok(url.trim().to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}
