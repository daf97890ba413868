//! Print commands: dump the assembled configuration or its head tags.

use std::path::Path;

use anyhow::{Context, Result};
use docsite_config::{head_html, to_canonical_json, SiteConfig};
use serde_json::Value;

use crate::PrintFormat;

/// Print the assembled configuration in the requested format.
pub fn run(config_path: &Path, format: PrintFormat) -> Result<()> {
    let config = super::assemble(config_path, &[], None)?;
    println!("{}", render(&config, format)?);
    Ok(())
}

/// Encode an assembled configuration.
pub fn render(config: &SiteConfig, format: PrintFormat) -> Result<String> {
    let text = match format {
        PrintFormat::Json => to_canonical_json(config)?,
        PrintFormat::Yaml => serde_yaml::to_string(config).context("Failed to encode YAML")?,
        PrintFormat::Toml => {
            let mut value = serde_json::to_value(config).context("Failed to encode TOML")?;
            drop_nulls(&mut value);
            toml::to_string_pretty(&value).context("Failed to encode TOML")?
        }
    };
    Ok(text)
}

/// TOML has no null; options bags may carry them.
fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(drop_nulls);
        }
        _ => {}
    }
}

/// Print the head injections as HTML.
pub fn head(config_path: &Path) -> Result<()> {
    let config = super::assemble(config_path, &[], None)?;

    let html = head_html(&config);
    if html.is_empty() {
        tracing::info!("No head injections configured");
    } else {
        println!("{}", html);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const WITH_NULLS: &str = r#"{
  "site": "https://example.com",
  "title": "Docs",
  "integrations": [
    { "package": "@astrojs/starlight", "options": { "favicon": null, "lastUpdated": true } },
    { "package": "@astrojs/tailwind", "options": { "nesting": [null, true] } }
  ]
}"#;

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("docsite.json");
        fs::write(&path, WITH_NULLS).unwrap();
        path
    }

    #[test]
    fn toml_output_drops_null_options() {
        let temp = tempdir().unwrap();
        let config = super::super::assemble(&write_config(temp.path()), &[], None).unwrap();

        let text = render(&config, PrintFormat::Toml).unwrap();
        let parsed: toml::Value = toml::from_str(&text).unwrap();

        assert_eq!(parsed["title"].as_str(), Some("Docs"));
        let theme = &parsed["integrations"][0]["options"];
        assert_eq!(theme["lastUpdated"].as_bool(), Some(true));
        assert!(theme.get("favicon").is_none());
        let nesting = parsed["integrations"][1]["options"]["nesting"].as_array().unwrap();
        assert_eq!(nesting, &vec![toml::Value::Boolean(true)]);
    }

    #[test]
    fn json_and_yaml_keep_the_full_config() {
        let temp = tempdir().unwrap();
        let config = super::super::assemble(&write_config(temp.path()), &[], None).unwrap();

        let json = render(&config, PrintFormat::Json).unwrap();
        assert!(json.contains(r#""favicon": null"#));

        let yaml = render(&config, PrintFormat::Yaml).unwrap();
        assert!(yaml.contains("title: Docs"));
    }

    #[test]
    fn run_prints_every_format() {
        let temp = tempdir().unwrap();
        let path = write_config(temp.path());

        for format in [PrintFormat::Json, PrintFormat::Yaml, PrintFormat::Toml] {
            run(&path, format).unwrap();
        }
        head(&path).unwrap();
    }
}
