//! CLI error types.

use rw_alias::ExportError;
use rw_config::ConfigError;
use rw_storage_fs::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0} alias warning(s) with --strict")]
    Strict(usize),
}
