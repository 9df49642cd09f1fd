//! Alias pass options.

use serde::Deserialize;

/// Options recognized by the alias passes.
///
/// Flags default to `false` and `meta_key` to unset, so an empty
/// configuration block is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Log every registration and replacement, and write the alias export file.
    pub verbose: bool,
    /// Use the heading text as link text for `[[alias#anchor]]`.
    pub use_anchor_titles: bool,
    /// Prefix link text with the target page's icon.
    pub use_page_icon: bool,
    /// Read aliases from this front-matter key instead of `alias`/`aliases`.
    pub meta_key: Option<String>,
}
