//! Tags injected into every page's `<head>`.
//!
//! # Example
//!
//! ```toml
//! [[head]]
//! tag = "script"
//! attrs = { src = "https://scripts.withcabin.com/hello.js", defer = true, async = true }
//! ```

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Tags allowed inside `<head>`.
const HEAD_TAGS: &[&str] = &["base", "link", "meta", "noscript", "script", "style", "title"];

/// Tags rendered without a closing tag.
const VOID_TAGS: &[&str] = &["base", "link", "meta"];

/// An attribute value. `true` renders a bare attribute, `false` omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Flag(bool),
    Text(String),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<AttrValue> for Value {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Flag(b) => Value::Bool(b),
            AttrValue::Text(s) => Value::String(s),
        }
    }
}

impl AttrValue {
    /// Read a declared value; only strings and booleans are attribute values.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Flag(*b)),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

/// A single head injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadInjection {
    pub tag: String,
    /// Attributes in declaration order.
    #[serde(default, alias = "attributes")]
    pub attrs: Map<String, Value>,
    /// Inline content, e.g. the body of a `<script>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl HeadInjection {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Map::new(),
            content: None,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), Value::from(value.into()));
        self
    }

    /// Render as an HTML tag.
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag);

        for (name, value) in &self.attrs {
            let Some(value) = AttrValue::from_value(value) else {
                continue;
            };
            match value {
                AttrValue::Flag(true) => {
                    let _ = write!(html, " {}", name);
                }
                AttrValue::Flag(false) => {}
                AttrValue::Text(text) => {
                    let _ = write!(html, " {}=\"{}\"", name, escape_attr(&text));
                }
            }
        }
        html.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return html;
        }

        if let Some(content) = &self.content {
            html.push_str(content);
        }
        let _ = write!(html, "</{}>", self.tag);
        html
    }
}

/// Validate tag and attribute names of every injection.
pub fn validate(head: &[HeadInjection]) -> Result<(), ConfigError> {
    static ATTR_NAME: OnceLock<Regex> = OnceLock::new();
    let attr_name = ATTR_NAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z_:][-A-Za-z0-9_:.]*$").expect("valid attribute regex")
    });

    for (index, entry) in head.iter().enumerate() {
        if !HEAD_TAGS.contains(&entry.tag.as_str()) {
            return Err(ConfigError::InvalidHeadTag {
                index,
                tag: entry.tag.clone(),
            });
        }

        for (name, value) in &entry.attrs {
            if !attr_name.is_match(name) {
                return Err(ConfigError::InvalidAttribute {
                    index,
                    name: name.clone(),
                });
            }
            if AttrValue::from_value(value).is_none() {
                return Err(ConfigError::InvalidAttributeValue {
                    index,
                    name: name.clone(),
                });
            }
        }
    }

    Ok(())
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cabin() -> HeadInjection {
        HeadInjection::new("script")
            .attr("src", "https://scripts.withcabin.com/hello.js")
            .attr("defer", true)
            .attr("async", true)
    }

    #[test]
    fn deserializes_from_toml() {
        let entry: HeadInjection = toml::from_str(
            r#"
tag = "script"
attrs = { src = "https://scripts.withcabin.com/hello.js", defer = true, async = true }
"#,
        )
        .unwrap();

        assert_eq!(entry, cabin());
        let names: Vec<&str> = entry.attrs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["src", "defer", "async"]);
    }

    #[test]
    fn renders_attributes_in_declaration_order() {
        assert_eq!(
            cabin().to_html(),
            r#"<script src="https://scripts.withcabin.com/hello.js" defer async></script>"#
        );
    }

    #[test]
    fn renders_void_tags_and_content() {
        let meta = HeadInjection::new("meta")
            .attr("name", "robots")
            .attr("content", "noindex")
            .attr("hidden", false);
        assert_eq!(meta.to_html(), r#"<meta name="robots" content="noindex">"#);

        let mut style = HeadInjection::new("style");
        style.content = Some("body{margin:0}".to_string());
        assert_eq!(style.to_html(), "<style>body{margin:0}</style>");
    }

    #[test]
    fn escapes_attribute_values() {
        let link = HeadInjection::new("link").attr("href", "/a?x=1&y=\"2\"");

        assert_eq!(link.to_html(), r#"<link href="/a?x=1&amp;y=&quot;2&quot;">"#);
    }

    #[test]
    fn rejects_body_tags_and_bad_attributes() {
        assert!(matches!(
            validate(&[cabin(), HeadInjection::new("div")]),
            Err(ConfigError::InvalidHeadTag { index: 1, .. })
        ));
        assert!(matches!(
            validate(&[HeadInjection::new("meta").attr("on load", "x")]),
            Err(ConfigError::InvalidAttribute { index: 0, .. })
        ));
        assert!(validate(&[cabin()]).is_ok());
    }

    #[test]
    fn rejects_non_scalar_attribute_values() {
        let entry: HeadInjection =
            serde_json::from_str(r#"{ "tag": "script", "attrs": { "src": "/a.js", "defer": 1 } }"#)
                .unwrap();

        assert!(matches!(
            validate(&[entry]),
            Err(ConfigError::InvalidAttributeValue { index: 0, name }) if name == "defer"
        ));
    }
}
