//! Declarative configuration for documentation sites.
//!
//! This crate loads site declarations (TOML, YAML or JSON), layers them,
//! normalizes and validates the result into one immutable [`SiteConfig`],
//! and emits the entry-point modules the site generator and CSS-utility
//! framework consume.

pub mod assembler;
pub mod assets;
pub mod css;
pub mod declaration;
pub mod emit;
pub mod error;
pub mod head;
pub mod integration;
pub mod resolve;
pub mod sidebar;
pub mod site;
pub mod social;

pub use assembler::Assembler;
pub use assets::{CustomAssets, Logo};
pub use css::CssUtilityConfig;
pub use declaration::{Format, SiteDeclaration};
pub use emit::{head_html, theme_options, to_canonical_json, Emitter};
pub use error::ConfigError;
pub use head::{AttrValue, HeadInjection};
pub use integration::{IntegrationDecl, IntegrationKind, IntegrationRef};
pub use resolve::{check_references, Problem, ReferenceReport};
pub use sidebar::SidebarEntry;
pub use site::{ImageService, SiteConfig};
pub use social::{Platform, SocialLink};
