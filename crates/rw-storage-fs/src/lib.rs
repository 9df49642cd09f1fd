//! Filesystem page source for RW alias builds.
//!
//! [`FsSource`] walks a documentation directory, reads every Markdown file
//! and splits its YAML front-matter from the body:
//!
//! - Recursive scan in sorted order, hidden entries skipped
//! - Front-matter parsed with `serde_yaml`; invalid YAML is logged and
//!   treated as empty metadata
//! - Rewritten bodies written back with their original front-matter
//!
//! # Example
//!
//! ```no_run
//! use rw_storage_fs::FsSource;
//!
//! let source = FsSource::new("docs");
//! for doc in source.scan()? {
//!     println!("{}: {} bytes", doc.url, doc.body.len());
//! }
//! # Ok::<(), rw_storage_fs::StorageError>(())
//! ```

mod scanner;
mod yaml;

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use scanner::Scanner;
use yaml::{parse_metadata, split_front_matter};

/// Error reading or writing documents.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Filesystem failure, with the path involved.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A Markdown document read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Path to the file on disk.
    pub path: PathBuf,
    /// Forward-slash path relative to the source root (e.g. `guide/setup.md`).
    pub url: String,
    /// Front-matter block exactly as written, delimiters included.
    pub front_matter: String,
    /// Parsed front-matter; [`Value::Null`] when absent or invalid.
    pub metadata: Value,
    /// Content after the front-matter.
    pub body: String,
}

impl SourceDocument {
    /// Reassemble the document with a replacement body.
    #[must_use]
    pub fn with_body(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.front_matter.len() + body.len());
        out.push_str(&self.front_matter);
        out.push_str(body);
        out
    }
}

/// Markdown source tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSource {
    source_dir: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Root directory of the source tree.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Read every Markdown document, sorted by URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SourceNotFound`] if the directory does not
    /// exist and [`StorageError::Io`] if a file or directory cannot be read.
    pub fn scan(&self) -> Result<Vec<SourceDocument>, StorageError> {
        if !self.source_dir.is_dir() {
            return Err(StorageError::SourceNotFound(self.source_dir.clone()));
        }

        let refs = Scanner::new(self.source_dir.clone()).scan()?;
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            documents = refs.len(),
            "Scanned source directory"
        );

        refs.into_iter()
            .map(|doc_ref| read_document(doc_ref.path, doc_ref.url))
            .collect()
    }

    /// Write a document under `output_dir` at its URL, creating directories.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file or its parent cannot be written.
    pub fn write(output_dir: &Path, url: &str, content: &str) -> Result<PathBuf, StorageError> {
        let path = output_dir.join(url);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        fs::write(&path, content).map_err(|e| StorageError::io(&path, e))?;
        Ok(path)
    }
}

fn read_document(path: PathBuf, url: String) -> Result<SourceDocument, StorageError> {
    let content = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
    let split = split_front_matter(&content);

    let metadata = match split.yaml.map(parse_metadata).transpose() {
        Ok(metadata) => metadata.unwrap_or(Value::Null),
        Err(e) => {
            tracing::warn!(path = %url, error = %e, "Invalid front-matter YAML, ignoring metadata");
            Value::Null
        }
    };

    Ok(SourceDocument {
        front_matter: split.header.to_owned(),
        body: split.body.to_owned(),
        metadata,
        path,
        url,
    })
}
