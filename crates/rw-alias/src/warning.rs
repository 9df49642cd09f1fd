//! Recoverable problems reported by the alias passes.

/// A data-level problem found while collecting or resolving aliases.
///
/// None of these stop the build: the offending declaration or reference is
/// skipped (or left as written) and the warning is logged and returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AliasWarning {
    /// A second definition of an already-registered alias name.
    #[error("{page}: alias '{name}' already defined in {existing}, skipping")]
    DuplicateAlias {
        /// Alias name.
        name: String,
        /// Page whose definition was rejected.
        page: String,
        /// Page holding the original definition.
        existing: String,
    },
    /// A reference to an alias that was never registered.
    #[error("Alias '{name}' not found in {page}")]
    AliasNotFound {
        /// Alias name as written in the reference.
        name: String,
        /// Referencing page.
        page: String,
    },
    /// An `alias`/`aliases` value that could not be understood.
    #[error("{page}: ignoring malformed '{key}' declaration: {reason}")]
    MalformedDeclaration {
        /// Declaring page.
        page: String,
        /// Metadata key (`alias` or `aliases`).
        key: String,
        /// What was wrong with the value.
        reason: String,
    },
}

impl AliasWarning {
    /// Log this warning to the build log and append it to `sink`.
    pub(crate) fn report(self, sink: &mut Vec<AliasWarning>) {
        let message = self.to_string();
        match &self {
            Self::DuplicateAlias {
                name,
                page,
                existing,
            } => tracing::warn!(alias = %name, page = %page, existing = %existing, "{message}"),
            Self::AliasNotFound { name, page } => {
                tracing::warn!(alias = %name, page = %page, "{message}");
            }
            Self::MalformedDeclaration { page, key, .. } => {
                tracing::warn!(page = %page, key = %key, "{message}");
            }
        }
        sink.push(self);
    }
}
