//! Serializes an assembled configuration and renders the framework entry
//! points that consume it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ConfigError;
use crate::integration::import_name;
use crate::site::{ImageService, SiteConfig};

/// File name of the canonical configuration dump.
pub const CANONICAL_FILE: &str = "config.json";

/// File name of the site-generator entry point.
pub const SITE_MODULE_FILE: &str = "astro.config.mjs";

/// File name of the CSS-utility entry point.
pub const CSS_MODULE_FILE: &str = "tailwind.config.cjs";

/// Serialize to pretty JSON. Identical configurations produce identical bytes.
pub fn to_canonical_json(config: &SiteConfig) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(config).map_err(|e| ConfigError::Render {
        template: CANONICAL_FILE.to_string(),
        message: e.to_string(),
    })
}

/// Render every head injection as one HTML line each.
pub fn head_html(config: &SiteConfig) -> String {
    config
        .head()
        .iter()
        .map(|h| h.to_html())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options handed to the documentation theme: its own options bag with the
/// site's docs settings laid over it.
pub fn theme_options(config: &SiteConfig) -> Map<String, Value> {
    let mut options = config
        .theme()
        .map(|t| t.options.clone())
        .unwrap_or_default();

    options.insert("title".to_string(), json!(config.title()));

    if !config.social().is_empty() {
        let social: Vec<Value> = config
            .social()
            .iter()
            .map(|link| {
                json!({
                    "icon": link.icon_or_default(),
                    "label": link.label_or_default(),
                    "href": link.url,
                })
            })
            .collect();
        options.insert("social".to_string(), Value::Array(social));
    }

    if !config.sidebar().is_empty() {
        options.insert("sidebar".to_string(), json!(config.sidebar()));
    }

    if let Some(logo) = &config.assets().logo {
        options.insert(
            "logo".to_string(),
            json!({
                "src": path_string(&logo.src),
                "replacesTitle": logo.replaces_title,
            }),
        );
    }

    if !config.assets().stylesheets.is_empty() {
        let css: Vec<String> = config
            .assets()
            .stylesheets
            .iter()
            .map(|p| path_string(p))
            .collect();
        options.insert("customCss".to_string(), json!(css));
    }

    if !config.head().is_empty() {
        options.insert("head".to_string(), json!(config.head()));
    }

    options
}

/// An `import x from 'pkg'` binding and the arguments its factory is called with.
#[derive(Debug, Serialize)]
struct ModuleBinding {
    name: String,
    package: String,
    args: String,
}

/// Renders the framework entry-point modules.
pub struct Emitter {
    env: Environment<'static>,
}

impl Emitter {
    /// Create an emitter with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_template(SITE_MODULE_FILE, SITE_TEMPLATE)
            .expect("Failed to add site module template");
        env.add_template(CSS_MODULE_FILE, CSS_TEMPLATE)
            .expect("Failed to add CSS module template");

        Self { env }
    }

    /// Render the site-generator config module.
    pub fn render_site_module(&self, config: &SiteConfig) -> Result<String, ConfigError> {
        let theme_package = config.theme().map(|t| t.package.as_str());

        let bindings: Vec<ModuleBinding> = config
            .integrations()
            .iter()
            .map(|i| -> Result<ModuleBinding, ConfigError> {
                let options = if Some(i.package.as_str()) == theme_package {
                    theme_options(config)
                } else {
                    i.options.clone()
                };
                Ok(ModuleBinding {
                    name: i.name.clone(),
                    package: i.package.clone(),
                    args: call_args(&options)?,
                })
            })
            .collect::<Result<_, _>>()?;

        let site = to_js(&json!(config.site_url().as_str()))?;

        self.render(
            SITE_MODULE_FILE,
            context! {
                site => site,
                passthrough => config.image_service() == ImageService::Passthrough,
                integrations => bindings,
            },
        )
    }

    /// Render the CSS-utility config module.
    pub fn render_css_module(&self, config: &SiteConfig) -> Result<String, ConfigError> {
        let css = config.css();

        let mut taken = HashSet::new();
        let plugins: Vec<ModuleBinding> = css
            .plugins
            .iter()
            .map(|package| {
                let base = import_name(package);
                let mut name = base.clone();
                let mut n = 2;
                while !taken.insert(name.clone()) {
                    name = format!("{}{}", base, n);
                    n += 1;
                }
                ModuleBinding {
                    name,
                    package: package.clone(),
                    args: String::new(),
                }
            })
            .collect();

        let content = indent(&to_js(&json!(css.content))?, "  ");
        let extend = indent(&to_js(&Value::Object(css.theme_extend.clone()))?, "    ");

        self.render(
            CSS_MODULE_FILE,
            context! {
                content => content,
                extend => extend,
                plugins => plugins,
            },
        )
    }

    /// Write the canonical dump and both modules into `out_dir`.
    pub fn write_all(&self, config: &SiteConfig, out_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        fs::create_dir_all(out_dir).map_err(|source| ConfigError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let outputs = [
            (CANONICAL_FILE, to_canonical_json(config)?),
            (SITE_MODULE_FILE, self.render_site_module(config)?),
            (CSS_MODULE_FILE, self.render_css_module(config)?),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (name, contents) in outputs {
            let path = out_dir.join(name);
            fs::write(&path, contents).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    fn render(&self, template: &str, ctx: minijinja::Value) -> Result<String, ConfigError> {
        self.env
            .get_template(template)
            .and_then(|t| t.render(ctx))
            .map_err(|e| ConfigError::Render {
                template: template.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory call arguments: nothing for an empty bag, else the bag as an
/// object literal.
fn call_args(options: &Map<String, Value>) -> Result<String, ConfigError> {
    if options.is_empty() {
        return Ok(String::new());
    }
    Ok(indent(&to_js(&Value::Object(options.clone()))?, "    "))
}

/// JSON is a subset of JavaScript expressions.
fn to_js(value: &Value) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(value).map_err(|e| ConfigError::Render {
        template: "JavaScript literal".to_string(),
        message: e.to_string(),
    })
}

/// Indent every line but the first.
fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

const SITE_TEMPLATE: &str = r#"// Generated by docsite. Do not edit by hand.
import { defineConfig{% if passthrough %}, passthroughImageService{% endif %} } from 'astro/config';
{% for item in integrations %}
import {{ item.name }} from '{{ item.package }}';
{% endfor %}

export default defineConfig({
  site: {{ site }},
{% if passthrough %}
  image: {
    service: passthroughImageService(),
  },
{% endif %}
  integrations: [
{% for item in integrations %}
    {{ item.name }}({{ item.args }}),
{% endfor %}
  ],
});
"#;

const CSS_TEMPLATE: &str = r#"// Generated by docsite. Do not edit by hand.
/** @type {import('tailwindcss').Config} */
{% for item in plugins %}
const {{ item.name }} = require('{{ item.package }}');
{% endfor %}

module.exports = {
  content: {{ content }},
  theme: {
    extend: {{ extend }},
  },
  plugins: [{% for item in plugins %}{{ item.name }}(){% if not loop.last %}, {% endif %}{% endfor %}],
};
"#;
