//! Document discovery by filesystem walking.
//!
//! The scanner only finds Markdown files. Reading and front-matter parsing
//! happen in [`FsSource`](crate::FsSource).

use std::fs;
use std::path::{Path, PathBuf};

use crate::StorageError;

/// Reference to a Markdown file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Forward-slash path relative to the source root (e.g. `guide/setup.md`).
    pub url: String,
    /// Path to the file on disk.
    pub path: PathBuf,
}

/// Discovers Markdown files under a source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Walk the source directory and return every `.md` file.
    ///
    /// Hidden files and directories are skipped. The result is sorted by URL,
    /// so repeated scans of the same tree yield the same order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if a directory cannot be read.
    pub fn scan(&self) -> Result<Vec<DocumentRef>, StorageError> {
        let mut refs = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut refs)?;
        refs.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(refs)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        url_prefix: &str,
        refs: &mut Vec<DocumentRef>,
    ) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir_path).map_err(|e| StorageError::io(dir_path, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(dir_path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let url = if url_prefix.is_empty() {
                name
            } else {
                format!("{url_prefix}/{name}")
            };

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                self.scan_directory(&path, &url, refs)?;
            } else if path.extension().is_some_and(|e| e == "md") {
                tracing::debug!(url = %url, "Found document");
                refs.push(DocumentRef { url, path });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(refs: &[DocumentRef]) -> Vec<&str> {
        refs.iter().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn test_scan_finds_md_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not markdown").unwrap();

        let domain_dir = temp_dir.path().join("domain");
        fs::create_dir(&domain_dir).unwrap();
        fs::write(domain_dir.join("index.md"), "# Domain").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(urls(&refs), vec!["domain/index.md", "guide.md"]);
        assert!(refs[0].path.ends_with("domain/index.md"));
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".hidden.md"), "# Hidden").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();
        let hidden_dir = temp_dir.path().join(".git");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.md"), "# Inside").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(urls(&refs), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_nested_structure_is_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Home").unwrap();
        let l2 = temp_dir.path().join("level1").join("level2");
        fs::create_dir_all(&l2).unwrap();
        fs::write(l2.join("deep.md"), "# Deep").unwrap();
        fs::write(temp_dir.path().join("level1").join("b.md"), "# B").unwrap();
        fs::write(temp_dir.path().join("level1").join("a.md"), "# A").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(
            urls(&refs),
            vec!["index.md", "level1/a.md", "level1/b.md", "level1/level2/deep.md"]
        );
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let refs = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let err = Scanner::new(PathBuf::from("/nonexistent/docs"))
            .scan()
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
