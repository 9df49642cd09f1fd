//! Wiki-style `[[alias]]` links for RW documentation.
//!
//! Pages declare short names in their front-matter:
//!
//! ```yaml
//! alias: setup
//! ```
//!
//! and any other page can then link to them with `[[setup]]`,
//! `[[setup#install|Install steps]]` or `[[#local-heading]]`. References
//! become ordinary relative Markdown links before rendering.
//!
//! # Architecture
//!
//! A build runs in two phases separated by a type-level barrier:
//!
//! - [`Collector`]: every page's metadata is registered into a
//!   [`RegistryBuilder`]. Duplicate names keep the first definition.
//! - [`Rewriter`]: the registry is frozen into an [`AliasRegistry`] and each
//!   page's content is rewritten by a [`Resolver`]. Unknown aliases are left
//!   as written.
//!
//! Recoverable problems are reported as [`AliasWarning`]s, both through
//! `tracing` and in the returned values.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rw_alias::{AliasConfig, AliasPlugin, Page};
//!
//! let plugin = AliasPlugin::new(AliasConfig::default());
//! let mut collector = plugin.start_build();
//!
//! let metadata: serde_yaml::Value = serde_yaml::from_str("alias: setup").unwrap();
//! let setup = Page::from_source("guide/setup.md", "guide/setup.md", &metadata, "# Setup\n");
//! collector.on_page_metadata(Arc::new(setup), &metadata);
//!
//! let mut rewriter = collector.finish();
//! let index = Page::new("index.md", "index.md");
//! let rewrite = rewriter.on_page_content(&index, "See [[setup]].");
//! assert_eq!(rewrite.content, "See [Setup](guide/setup.md).");
//! ```

mod config;
mod declaration;
mod export;
mod headings;
mod page;
mod plugin;
mod reference;
mod registry;
mod resolver;
mod url;
mod warning;

pub use config::AliasConfig;
pub use declaration::{
    ALIAS_KEYS, AliasDeclaration, DeclarationError, declarations, declarations_under, parse_value,
};
pub use export::{EXPORT_FILENAME, ExportError, render_export, write_export};
pub use headings::{Heading, extract_headings, first_h1, slugify};
pub use page::Page;
pub use plugin::{AliasPlugin, BuildSummary, Collector, Rewriter};
pub use reference::Reference;
pub use registry::{AliasEntry, AliasLookup, AliasRegistry, RegistryBuilder};
pub use resolver::{Link, Resolver, Rewrite, icon_shortcode};
pub use url::relative_path;
pub use warning::AliasWarning;
