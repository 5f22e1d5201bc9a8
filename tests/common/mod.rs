//! Shared test utilities for integration tests.
//!
//! This module provides common fixtures and helper collaborators to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::{poms, PluginFixture, RecordingPackager};
//!
//! #[test]
//! fn test_example() {
//!     let fixture = PluginFixture::with_parent();
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use assert_fs::TempDir;
use stage_repo::coordinate::Coordinate;
use stage_repo::descriptor::{DescriptorReader, PomReader};
use stage_repo::error::Result;
use stage_repo::stage::{Packager, PluginStager};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Common POM snippets for testing.
#[allow(dead_code)]
pub mod poms {
    /// Plugin POM with a parent reachable at ../parent/pom.xml.
    pub const PLUGIN_WITH_PARENT: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
  <parent>
    <groupId>G</groupId>
    <artifactId>P</artifactId>
    <version>2.0</version>
    <relativePath>../parent/pom.xml</relativePath>
  </parent>
  <groupId>G</groupId>
  <artifactId>A</artifactId>
  <version>1.0-SNAPSHOT</version>
  <packaging>maven-plugin</packaging>
</project>"#;

    /// Standalone plugin POM with no parent.
    pub const PLUGIN_STANDALONE: &str = r#"<project>
  <groupId>G</groupId>
  <artifactId>A</artifactId>
  <version>1.0-SNAPSHOT</version>
  <packaging>maven-plugin</packaging>
</project>"#;

    /// Parent POM, G:P:2.0.
    pub const PARENT: &str = r#"<project>
  <groupId>G</groupId>
  <artifactId>P</artifactId>
  <version>2.0</version>
  <packaging>pom</packaging>
</project>"#;

    /// Grandparent POM, G:GP:7.
    pub const GRANDPARENT: &str = r#"<project>
  <groupId>G</groupId>
  <artifactId>GP</artifactId>
  <version>7</version>
  <packaging>pom</packaging>
</project>"#;
}

/// A packager that fabricates the artifact instead of running a build.
///
/// Records every invocation so tests can assert on the arguments the
/// stager passed through. The fabricated jar's content embeds the version
/// so tests can tell staged artifacts apart.
pub struct RecordingPackager {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub descriptor_file: PathBuf,
    pub version: String,
    pub skip_unit_tests: bool,
    pub build_log: PathBuf,
}

impl RecordingPackager {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Packager for RecordingPackager {
    fn package_artifact(
        &self,
        descriptor_file: &Path,
        version: &str,
        skip_unit_tests: bool,
        build_log: &Path,
    ) -> Result<(Coordinate, PathBuf)> {
        self.calls.lock().unwrap().push(RecordedCall {
            descriptor_file: descriptor_file.to_path_buf(),
            version: version.to_string(),
            skip_unit_tests,
            build_log: build_log.to_path_buf(),
        });

        let descriptor = PomReader.read(descriptor_file)?;
        let project_dir = descriptor_file.parent().unwrap();
        let artifact = project_dir
            .join("target")
            .join(descriptor.coordinate.file_name());
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, format!("jar for version {}", version)).unwrap();
        Ok((descriptor.coordinate, artifact))
    }
}

/// A plugin project laid out in a temporary directory, ready to stage.
pub struct PluginFixture {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl PluginFixture {
    /// A plugin project whose parent POM is reachable at ../parent/pom.xml.
    pub fn with_parent() -> Self {
        let temp_dir = TempDir::new().unwrap();
        temp_dir
            .child("plugin/pom.xml")
            .write_str(poms::PLUGIN_WITH_PARENT)
            .unwrap();
        temp_dir
            .child("parent/pom.xml")
            .write_str(poms::PARENT)
            .unwrap();
        Self { temp_dir }
    }

    /// A plugin project with no parent reference.
    pub fn standalone() -> Self {
        let temp_dir = TempDir::new().unwrap();
        temp_dir
            .child("plugin/pom.xml")
            .write_str(poms::PLUGIN_STANDALONE)
            .unwrap();
        Self { temp_dir }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.temp_dir.path().join("plugin")
    }

    /// A stager over this fixture using the recording packager.
    pub fn stager(&self) -> (PluginStager, Arc<Mutex<Vec<RecordedCall>>>) {
        let packager = RecordingPackager::new();
        let calls = packager.calls.clone();
        let stager = PluginStager::with_collaborators(
            self.project_dir(),
            Box::new(PomReader),
            Box::new(packager),
        );
        (stager, calls)
    }
}
