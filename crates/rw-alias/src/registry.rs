//! Registry of alias names declared across the site.
//!
//! [`RegistryBuilder`] is filled page by page during the collection phase and
//! frozen into an [`AliasRegistry`] before any page is rewritten. The frozen
//! registry has no mutating methods.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_yaml::Value;

use crate::declaration::{AliasDeclaration, declarations, declarations_under};
use crate::page::Page;
use crate::warning::AliasWarning;

/// A registered alias pointing at a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasEntry {
    /// Alias name (case-sensitive key).
    pub name: String,
    /// Page the alias links to.
    pub page: Arc<Page>,
    /// Link text: the declared text, else the page title.
    pub text: Option<String>,
    /// Icon of the owning page, kept only when `text` is the page title.
    pub icon: Option<String>,
}

impl AliasEntry {
    /// Link text with the final URL fallback applied.
    ///
    /// Pages with neither declared text nor a title are labelled with their URL.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.text
            .as_deref()
            .or(self.page.title.as_deref())
            .unwrap_or(&self.page.url)
    }
}

/// Source of alias entries for reference resolution.
pub trait AliasLookup {
    /// Look up an alias by exact, case-sensitive name.
    fn lookup(&self, name: &str) -> Option<&AliasEntry>;
}

/// Mutable registry used during the collection phase.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, AliasEntry>,
    meta_key: Option<String>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read aliases from `key` instead of `alias`/`aliases`.
    #[must_use]
    pub fn with_meta_key(mut self, key: impl Into<String>) -> Self {
        self.meta_key = Some(key.into());
        self
    }

    /// Register every alias a page declares in its metadata.
    ///
    /// Malformed declarations and duplicates are logged and appended to
    /// `warnings`; the rest of the page's declarations are still registered.
    /// Returns the number of aliases added.
    pub fn register_page(
        &mut self,
        page: &Arc<Page>,
        metadata: &Value,
        warnings: &mut Vec<AliasWarning>,
    ) -> usize {
        let meta_key = self.meta_key.clone();
        let declared = match meta_key.as_deref() {
            Some(key) => declarations_under(metadata, &[key]),
            None => declarations(metadata),
        };

        let mut added = 0;
        for (key, declaration) in declared {
            let result = declaration
                .map_err(|e| AliasWarning::MalformedDeclaration {
                    page: page.src_path.clone(),
                    key: key.to_owned(),
                    reason: e.to_string(),
                })
                .and_then(|declaration| self.insert(page, declaration));
            match result {
                Ok(()) => added += 1,
                Err(warning) => warning.report(warnings),
            }
        }
        added
    }

    /// Insert one declaration; the first definition of a name wins.
    ///
    /// # Errors
    ///
    /// Returns [`AliasWarning::DuplicateAlias`] if the name is already taken.
    /// The registry is left unchanged in that case.
    pub fn insert(
        &mut self,
        page: &Arc<Page>,
        declaration: AliasDeclaration,
    ) -> Result<(), AliasWarning> {
        if let Some(existing) = self.entries.get(&declaration.name) {
            return Err(AliasWarning::DuplicateAlias {
                name: declaration.name,
                page: page.src_path.clone(),
                existing: existing.page.src_path.clone(),
            });
        }

        let (text, icon) = match declaration.text {
            Some(text) => (Some(text), None),
            None => (page.title.clone(), page.icon.clone().filter(|_| page.title.is_some())),
        };
        let entry = AliasEntry {
            text,
            icon,
            page: Arc::clone(page),
            name: declaration.name,
        };
        tracing::info!(
            alias = %entry.name,
            page = %entry.page.url,
            "Alias {} to {}",
            entry.name,
            entry.page.url
        );
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Number of aliases registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the registry for the rewrite phase.
    #[must_use]
    pub fn build(self) -> AliasRegistry {
        AliasRegistry {
            entries: self.entries,
        }
    }
}

/// Frozen alias registry, read-only for the rest of the build.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    entries: BTreeMap<String, AliasEntry>,
}

impl AliasRegistry {
    /// Look up an alias by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AliasEntry> {
        self.entries.get(name)
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in alias-name order.
    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.values()
    }
}

impl AliasLookup for AliasRegistry {
    fn lookup(&self, name: &str) -> Option<&AliasEntry> {
        self.get(name)
    }
}
