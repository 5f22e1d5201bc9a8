//! # Repository Coordinates
//!
//! This module defines the `Coordinate` type - the `(group, artifact,
//! version, extension)` tuple that identifies a component instance in a
//! repository - together with the canonical directory layout derived from
//! it, and the syntax rules for test-time version strings.
//!
//! ## Layout Convention
//!
//! A coordinate maps to a repository-relative path by splitting the group
//! identifier on `.` into nested directories, then appending the artifact
//! id, the version, and the file name `<artifactId>-<version>.<extension>`:
//!
//! ```text
//! org.example.plugins : my-plugin : 99-test : jar
//!   -> org/example/plugins/my-plugin/99-test/my-plugin-99-test.jar
//! ```
//!
//! This mirrors the standard coordinate-addressed repository convention, so
//! a build tool configured to use a directory produced by this library as
//! its local repository resolves components by coordinate alone.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;

/// Identity of one component instance in a coordinate-addressed repository.
///
/// Immutable once constructed; staging derives every repository path from
/// the coordinate rather than from the source file's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Hierarchical group identifier, `.`-separated (e.g. `org.example`).
    pub group_id: String,
    /// Artifact identifier within the group.
    pub artifact_id: String,
    /// Version string. Not required to be semver; Maven-style versions
    /// such as `1.0-SNAPSHOT` or `99-test` are valid.
    pub version: String,
    /// File extension of the addressed file (e.g. `jar`, `pom`).
    pub extension: String,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            extension: extension.into(),
        }
    }

    /// Returns the same coordinate addressed as a descriptor (`pom`) file.
    ///
    /// Used when installing a component's POM next to its artifact.
    pub fn pom(&self) -> Coordinate {
        Coordinate {
            extension: "pom".to_string(),
            ..self.clone()
        }
    }

    /// Returns the canonical file name, `<artifactId>-<version>.<extension>`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, self.extension)
    }

    /// Returns the repository-relative path for this coordinate.
    ///
    /// The group id is split on `.` into nested directories.
    pub fn repository_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.group_id.split('.') {
            path.push(segment);
        }
        path.push(&self.artifact_id);
        path.push(&self.version);
        path.push(self.file_name());
        path
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.extension
        )
    }
}

/// Validates a test-time version string against coordinate-version syntax.
///
/// Versions are not required to be semantic versions, but they become both
/// a directory name and part of a file name in the repository layout, so
/// they must be non-empty and restricted to alphanumerics plus `.`, `_`
/// and `-`.
pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        return Err(Error::InvalidVersion {
            version: version.to_string(),
            message: "version must not be empty".to_string(),
        });
    }

    let pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").map_err(Error::Regex)?;
    if !pattern.is_match(version) {
        return Err(Error::InvalidVersion {
            version: version.to_string(),
            message: "version may only contain alphanumerics, '.', '_' and '-', \
                      and must start with an alphanumeric"
                .to_string(),
        });
    }

    Ok(())
}
