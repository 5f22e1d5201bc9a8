//! # Repository Layout Installation
//!
//! Installs files into a repository root at their coordinate-derived
//! canonical paths, creating intermediate directories as needed.
//!
//! Installation copies and overwrites: staging the same coordinate twice
//! yields the same final state as staging it once, which is what makes
//! re-running a failed staging call safe without any cleanup step. Staging
//! never modifies anything outside the target root.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Installs `source` into `root` at the canonical path for `coordinate`.
///
/// Creates all intermediate directories and overwrites any existing file
/// at the destination. Returns the installed path.
pub fn install(root: &Path, coordinate: &Coordinate, source: &Path) -> Result<PathBuf> {
    let destination = root.join(coordinate.repository_path());

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Install {
            src: source.to_path_buf(),
            dst: destination.clone(),
            message: format!("failed to create directory '{}': {}", parent.display(), e),
        })?;
    }

    fs::copy(source, &destination).map_err(|e| Error::Install {
        src: source.to_path_buf(),
        dst: destination.clone(),
        message: e.to_string(),
    })?;

    debug!("installed {} at {}", coordinate, destination.display());
    Ok(destination)
}

/// Lists every file installed under `root`, sorted by path.
///
/// Intended for harness-side verification of what a staging call actually
/// produced. A root that does not exist yet lists as empty.
pub fn list_installed(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn coordinate() -> Coordinate {
        Coordinate::new("org.example.plugins", "my-plugin", "99-test", "jar")
    }

    #[test]
    fn test_install_creates_nested_layout() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("artifact.jar");
        fs::write(&source, b"jar bytes").unwrap();
        let root = temp_dir.path().join("repo");

        let installed = install(&root, &coordinate(), &source).unwrap();

        assert_eq!(
            installed,
            root.join("org/example/plugins/my-plugin/99-test/my-plugin-99-test.jar")
        );
        assert_eq!(fs::read(&installed).unwrap(), b"jar bytes");
    }

    #[test]
    fn test_install_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("artifact.jar");
        fs::write(&source, b"jar bytes").unwrap();
        let root = temp_dir.path().join("repo");

        let first = install(&root, &coordinate(), &source).unwrap();
        let second = install(&root, &coordinate(), &source).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), b"jar bytes");
        // Exactly one file in the repository
        assert_eq!(list_installed(&root).unwrap().len(), 1);
    }

    #[test]
    fn test_install_overwrites_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("artifact.jar");
        let root = temp_dir.path().join("repo");

        fs::write(&source, b"old").unwrap();
        install(&root, &coordinate(), &source).unwrap();

        fs::write(&source, b"new").unwrap();
        let installed = install(&root, &coordinate(), &source).unwrap();
        assert_eq!(fs::read(&installed).unwrap(), b"new");
    }

    #[test]
    fn test_install_unreadable_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist.jar");
        let root = temp_dir.path().join("repo");

        let error = install(&root, &coordinate(), &missing).unwrap_err();
        assert!(matches!(error, Error::Install { .. }));
        assert!(error.to_string().contains("does-not-exist.jar"));
    }

    #[test]
    fn test_list_installed_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("never-created");
        assert!(list_installed(&root).unwrap().is_empty());
    }

    #[test]
    fn test_list_installed_reports_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("artifact.jar");
        fs::write(&source, b"jar bytes").unwrap();
        let root = temp_dir.path().join("repo");

        install(&root, &coordinate(), &source).unwrap();
        install(&root, &coordinate().pom(), &source).unwrap();

        let files = list_installed(&root).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_file()));
    }
}
