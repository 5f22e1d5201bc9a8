//! Default path conventions for staging.
//!
//! This module centralizes the conventional locations used when a caller
//! does not supply explicit ones. All of them resolve against the project
//! directory, fixed when the stager is constructed and never mutated.

use std::path::{Path, PathBuf};

/// Returns the project's own descriptor file, `<project_dir>/pom.xml`.
pub fn descriptor_path(project_dir: &Path) -> PathBuf {
    project_dir.join("pom.xml")
}

/// Returns the conventional build-log capture location for the staging
/// build, `<project_dir>/target/test-build-logs/setup.build.log`.
pub fn build_log_path(project_dir: &Path) -> PathBuf {
    project_dir
        .join("target")
        .join("test-build-logs")
        .join("setup.build.log")
}

/// Returns the default transient repository root,
/// `<project_dir>/target/test-local-repository`.
///
/// The location is deterministic: two staging calls without an explicit
/// root target the same directory, which per-artifact idempotence makes
/// safe.
pub fn repository_root(project_dir: &Path) -> PathBuf {
    project_dir.join("target").join("test-local-repository")
}
