//! Tab-delimited alias export.
//!
//! One record per alias: name, owning page URL, display text.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::registry::AliasRegistry;

/// File name of the export, relative to the project directory.
pub const EXPORT_FILENAME: &str = "aliases.tsv";

/// Failure writing the alias export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The export file or its directory could not be written.
    #[error("Failed to write alias export {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Render the export as a string, one line per alias in name order.
#[must_use]
pub fn render_export(registry: &AliasRegistry) -> String {
    let mut out = String::new();
    for entry in registry.iter() {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            field(&entry.name),
            field(&entry.page.url),
            field(entry.text.as_deref().unwrap_or_default())
        );
    }
    out
}

/// Write the export to `<project_dir>/aliases.tsv`, creating the directory.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory or file cannot be written.
pub fn write_export(registry: &AliasRegistry, project_dir: &Path) -> Result<PathBuf, ExportError> {
    let path = project_dir.join(EXPORT_FILENAME);
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(project_dir).map_err(io_err)?;
    std::fs::write(&path, render_export(registry)).map_err(io_err)?;

    tracing::debug!(path = %path.display(), aliases = registry.len(), "Wrote alias export");
    Ok(path)
}

/// Keep a field on one line inside its column.
fn field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
