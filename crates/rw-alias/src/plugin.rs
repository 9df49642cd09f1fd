//! Build lifecycle: collection phase, then rewrite phase.
//!
//! ```text
//! AliasPlugin::start_build ─► Collector ─finish─► Rewriter ─finish─► BuildSummary
//!                             on_page_metadata     on_page_content
//! ```
//!
//! The collector owns the only mutable registry. [`Collector::finish`]
//! consumes it and hands a frozen [`AliasRegistry`] to the rewriter, so no
//! page can be rewritten before every page has been collected.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::Value;

use crate::config::AliasConfig;
use crate::export::{ExportError, write_export};
use crate::page::Page;
use crate::registry::{AliasRegistry, RegistryBuilder};
use crate::resolver::{Resolver, Rewrite};
use crate::warning::AliasWarning;

/// Entry point for a host build pipeline.
#[derive(Clone, Debug, Default)]
pub struct AliasPlugin {
    config: AliasConfig,
}

impl AliasPlugin {
    /// Create a plugin with the given options.
    #[must_use]
    pub fn new(config: AliasConfig) -> Self {
        Self { config }
    }

    /// Plugin options.
    #[must_use]
    pub fn config(&self) -> &AliasConfig {
        &self.config
    }

    /// Begin a build with an empty registry.
    #[must_use]
    pub fn start_build(&self) -> Collector {
        let builder = match &self.config.meta_key {
            Some(key) => RegistryBuilder::new().with_meta_key(key.as_str()),
            None => RegistryBuilder::new(),
        };
        Collector {
            config: self.config.clone(),
            builder,
            warnings: Vec::new(),
        }
    }
}

/// Collection phase: registers aliases page by page.
#[derive(Debug)]
pub struct Collector {
    config: AliasConfig,
    builder: RegistryBuilder,
    warnings: Vec<AliasWarning>,
}

impl Collector {
    /// Register the aliases declared in one page's metadata.
    ///
    /// Pages must be supplied in a stable order; the first page to declare a
    /// name owns it. Returns the number of aliases the page added.
    pub fn on_page_metadata(&mut self, page: Arc<Page>, metadata: &Value) -> usize {
        self.builder.register_page(&page, metadata, &mut self.warnings)
    }

    /// Warnings raised so far.
    #[must_use]
    pub fn warnings(&self) -> &[AliasWarning] {
        &self.warnings
    }

    /// Number of aliases registered so far.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.builder.len()
    }

    /// Freeze the registry and start the rewrite phase.
    #[must_use]
    pub fn finish(self) -> Rewriter {
        let registry = self.builder.build();
        tracing::debug!(aliases = registry.len(), "Alias collection complete");
        Rewriter {
            config: self.config,
            registry,
            warnings: self.warnings,
            resolved: 0,
            unresolved: 0,
        }
    }
}

/// Rewrite phase: substitutes references in page content.
#[derive(Debug)]
pub struct Rewriter {
    config: AliasConfig,
    registry: AliasRegistry,
    warnings: Vec<AliasWarning>,
    resolved: usize,
    unresolved: usize,
}

impl Rewriter {
    /// The frozen registry.
    #[must_use]
    pub fn registry(&self) -> &AliasRegistry {
        &self.registry
    }

    /// Rewrite one page's content.
    ///
    /// The returned [`Rewrite`] carries this page's warnings; they are also
    /// kept for the build summary.
    pub fn on_page_content(&mut self, page: &Page, content: &str) -> Rewrite {
        let rewrite = Resolver::new(&self.registry, &self.config).rewrite(page, content);
        self.resolved += rewrite.resolved;
        self.unresolved += rewrite.unresolved;
        self.warnings.extend(rewrite.warnings.iter().cloned());
        rewrite
    }

    /// End the build.
    ///
    /// In verbose mode the alias export is written to `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the export file cannot be written.
    pub fn finish(self, project_dir: &Path) -> Result<BuildSummary, ExportError> {
        let export_path = if self.config.verbose {
            Some(write_export(&self.registry, project_dir)?)
        } else {
            None
        };

        tracing::info!("Defined {} alias(es)", self.registry.len());

        Ok(BuildSummary {
            aliases: self.registry.len(),
            references_resolved: self.resolved,
            references_unresolved: self.unresolved,
            warnings: self.warnings,
            export_path,
        })
    }
}

/// Outcome of a completed build.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// Number of registered aliases.
    pub aliases: usize,
    /// References replaced with links.
    pub references_resolved: usize,
    /// References left untouched.
    pub references_unresolved: usize,
    /// Every warning from both phases, in order.
    pub warnings: Vec<AliasWarning>,
    /// Export file, when one was written.
    pub export_path: Option<PathBuf>,
}

impl BuildSummary {
    /// Whether the build produced any warning.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
