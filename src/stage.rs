//! # Staging Facade
//!
//! This module provides the `PluginStager`, the single point of access for
//! staging a plugin artifact - along with its POM lineage - into a clean
//! test-time local repository.
//!
//! ## Design
//!
//! The stager is built around a trait-based design that separates the
//! staging protocol from its two external collaborators:
//!
//! - **`Packager`**: builds the plugin artifact from its (already stamped)
//!   descriptor file. `MavenPackager` is the default, wrapping the system
//!   `mvn` command.
//!
//! - **`DescriptorReader`** (from the `descriptor` module): parses
//!   descriptor files. `PomReader` is the default.
//!
//! Both are injected through the constructor - there is no runtime service
//! lookup - which lets tests substitute mocks without running a real build.
//!
//! ## Failure Policy
//!
//! Every step is sequential and blocking, and any failure aborts the whole
//! call, surfacing as a single `Staging` error wrapping the cause (with
//! the build-log location attached when packaging was involved). No
//! partial cleanup is attempted: the target root is disposable and
//! per-artifact installation is idempotent, so the recovery path is to fix
//! the cause and re-run. Two staging calls against the *same* root are not
//! serialized by this library; callers must not interleave them.

use crate::ancestry::resolve_ancestry;
use crate::coordinate::Coordinate;
use crate::defaults;
use crate::descriptor::{DescriptorReader, PomReader};
use crate::error::{Error, Result};
use crate::layout::install;
use crate::stamp::stamp_version;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for artifact packaging - allows mocking in tests
pub trait Packager {
    /// Builds the plugin artifact from the descriptor file at
    /// `descriptor_file`, which has already been stamped with `version`
    /// on disk.
    ///
    /// `skip_unit_tests` suppresses unit-test execution during the build
    /// (used when staging is itself driven from a test run, to avoid a
    /// recursive test-and-build loop). Build output is captured into
    /// `build_log`.
    ///
    /// Returns the packaged artifact's coordinate and file.
    fn package_artifact(
        &self,
        descriptor_file: &Path,
        version: &str,
        skip_unit_tests: bool,
        build_log: &Path,
    ) -> Result<(Coordinate, PathBuf)>;
}

/// The default `Packager`, which runs the system `mvn` command.
///
/// Like the system-git approach to cloning, shelling out to the installed
/// Maven picks up the developer's settings, toolchains, and repository
/// configuration without this library reimplementing any of it.
pub struct MavenPackager;

impl Packager for MavenPackager {
    fn package_artifact(
        &self,
        descriptor_file: &Path,
        _version: &str,
        skip_unit_tests: bool,
        build_log: &Path,
    ) -> Result<(Coordinate, PathBuf)> {
        let project_dir = descriptor_file.parent().unwrap_or_else(|| Path::new("."));

        // mvn resolves a relative log path against its own working
        // directory, not the caller's.
        let build_log = if build_log.is_absolute() {
            build_log.to_path_buf()
        } else {
            std::env::current_dir()?.join(build_log)
        };

        if let Some(parent) = build_log.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Build {
                message: format!(
                    "failed to create build-log directory '{}': {}",
                    parent.display(),
                    e
                ),
                log: None,
            })?;
        }

        let mut command = Command::new("mvn");
        command
            .arg("package")
            .arg("--batch-mode")
            .arg("--log-file")
            .arg(&build_log)
            .current_dir(project_dir);
        if skip_unit_tests {
            command.arg("-Dmaven.test.skip=true");
        }

        let output = command.output().map_err(|e| Error::Build {
            message: format!("failed to run mvn: {}", e),
            log: None,
        })?;

        if !output.status.success() {
            return Err(Error::Build {
                message: format!("mvn package exited with {}", output.status),
                log: Some(build_log.clone()),
            });
        }

        // The descriptor was stamped before packaging, so re-reading it
        // yields the coordinate the build actually produced.
        let descriptor = PomReader.read(descriptor_file)?;
        let artifact = project_dir
            .join("target")
            .join(descriptor.coordinate.file_name());
        if !artifact.is_file() {
            return Err(Error::Build {
                message: format!(
                    "build succeeded but no artifact was produced at '{}'",
                    artifact.display()
                ),
                log: Some(build_log),
            });
        }

        Ok((descriptor.coordinate, artifact))
    }
}

/// Single point of access for staging a plugin into a test-time local
/// repository.
///
/// **Warning:** ancestor POMs that exist *only* in the developer's normal
/// local repository, and are not reachable through `<relativePath>`, will
/// not be staged. Consumer test builds that need such an ancestor will
/// fail to resolve it.
pub struct PluginStager {
    project_dir: PathBuf,
    reader: Box<dyn DescriptorReader>,
    packager: Box<dyn Packager>,
}

impl PluginStager {
    /// Creates a stager for the plugin project at `project_dir`, with the
    /// default POM reader and Maven packager.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            reader: Box::new(PomReader),
            packager: Box::new(MavenPackager),
        }
    }

    /// Creates a stager with custom `DescriptorReader` and `Packager`
    /// implementations.
    ///
    /// This is primarily used for testing to inject mock collaborators.
    pub fn with_collaborators(
        project_dir: impl Into<PathBuf>,
        reader: Box<dyn DescriptorReader>,
        packager: Box<dyn Packager>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            reader,
            packager,
        }
    }

    /// Stages the plugin under `test_version` into the default transient
    /// repository and returns that repository's base directory.
    pub fn prepare_for_integration_testing(&self, test_version: &str) -> Result<PathBuf> {
        self.prepare_for_testing(test_version, false, None)
    }

    /// Stages the plugin under `test_version` into the default transient
    /// repository, skipping unit tests during packaging.
    ///
    /// Use this when staging runs inside the plugin's own test suite,
    /// where executing unit tests again would recurse.
    pub fn prepare_for_unit_testing_with_builds(&self, test_version: &str) -> Result<PathBuf> {
        self.prepare_for_testing(test_version, true, None)
    }

    /// Stages the plugin under `test_version` into `repository_root`.
    pub fn prepare_for_integration_testing_in(
        &self,
        test_version: &str,
        repository_root: &Path,
    ) -> Result<PathBuf> {
        self.prepare_for_testing(test_version, false, Some(repository_root))
    }

    /// Stages the plugin under `test_version` into `repository_root`,
    /// skipping unit tests during packaging.
    pub fn prepare_for_unit_testing_with_builds_in(
        &self,
        test_version: &str,
        repository_root: &Path,
    ) -> Result<PathBuf> {
        self.prepare_for_testing(test_version, true, Some(repository_root))
    }

    /// Stages the plugin: stamp, package, resolve ancestry, install.
    ///
    /// All four public entry points converge here. Returns the repository
    /// root containing the staged plugin, or a `Staging` error wrapping
    /// whatever step failed.
    pub fn prepare_for_testing(
        &self,
        test_version: &str,
        skip_unit_tests: bool,
        repository_root: Option<&Path>,
    ) -> Result<PathBuf> {
        // The packager runs with the project directory as its working
        // directory, so every path crossing that boundary must be
        // absolute. A project directory that does not resolve is left
        // as given and fails below when its descriptor is read.
        let project_dir = self
            .project_dir
            .canonicalize()
            .unwrap_or_else(|_| self.project_dir.clone());
        let build_log = defaults::build_log_path(&project_dir);
        self.stage(
            &project_dir,
            test_version,
            skip_unit_tests,
            repository_root,
            &build_log,
        )
        .map_err(|e| wrap_staging_error(e, &build_log))
    }

    fn stage(
        &self,
        project_dir: &Path,
        test_version: &str,
        skip_unit_tests: bool,
        repository_root: Option<&Path>,
        build_log: &Path,
    ) -> Result<PathBuf> {
        // A log left behind by an earlier run must not be reported for
        // this one.
        if build_log.exists() {
            fs::remove_file(build_log)?;
        }

        let descriptor_path = defaults::descriptor_path(project_dir);
        let mut descriptor = self.reader.read(&descriptor_path)?;
        info!(
            "staging {} under test version {}",
            descriptor.coordinate, test_version
        );

        // The stamped descriptor is persisted to disk before packaging;
        // the packager reads it from there.
        stamp_version(&mut descriptor, test_version)?;
        let (artifact_coordinate, artifact_file) = self.packager.package_artifact(
            &descriptor.source,
            test_version,
            skip_unit_tests,
            build_log,
        )?;

        // Parent links are untouched by the stamp, so ancestry resolves
        // from the same descriptor location.
        let chain = resolve_ancestry(&descriptor, self.reader.as_ref())?;

        let root = match repository_root {
            Some(root) => root.to_path_buf(),
            None => defaults::repository_root(project_dir),
        };

        install(&root, &artifact_coordinate, &artifact_file)?;
        for ancestor in &chain {
            install(&root, &ancestor.coordinate.pom(), &ancestor.source)?;
        }

        debug!(
            "installed {} plus {} descriptor(s) into {}",
            artifact_coordinate,
            chain.len(),
            root.display()
        );
        info!("staged repository ready at {}", root.display());
        Ok(root)
    }
}

/// Wraps a step failure into the single reported staging error, attaching
/// the build-log location when the build got far enough to produce one.
fn wrap_staging_error(cause: Error, build_log: &Path) -> Error {
    let build_log = match &cause {
        Error::Build { log, .. } => log.clone(),
        _ if build_log.exists() => Some(build_log.to_path_buf()),
        _ => None,
    };
    Error::Staging {
        build_log,
        source: Box::new(cause),
    }
}
