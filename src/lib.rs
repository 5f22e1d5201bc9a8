//! # Plugin Staging Library
//!
//! This library stages an in-development Maven plugin - along with its full
//! POM ancestry - into an isolated, disposable local repository under a
//! stable test-time version. Test harnesses point a consumer build at the
//! staged repository so the build can resolve the plugin and every one of
//! its ancestor POMs by coordinate alone, without touching (or polluting)
//! the developer's primary local repository.
//!
//! ## Quick Example
//!
//! ```no_run
//! use stage_repo::stage::PluginStager;
//!
//! // Stage the plugin in the current directory under version "test"
//! let stager = PluginStager::new(".");
//! let repository_root = stager.prepare_for_integration_testing("test").unwrap();
//! println!("staged into {}", repository_root.display());
//! ```
//!
//! ## Core Concepts
//!
//! - **Coordinate (`coordinate`)**: The `(group, artifact, version, extension)`
//!   tuple that identifies a component in a repository, and the canonical
//!   directory layout derived from it.
//! - **Descriptor (`descriptor`)**: A parsed POM - its own coordinate, an
//!   optional parent reference, and the file it was read from. The
//!   `DescriptorReader` trait is the parsing seam; `PomReader` is the
//!   default XML-backed implementation.
//! - **Version Stamping (`stamp`)**: Rewrites a descriptor's own version to
//!   the supplied test version, on disk, before packaging.
//! - **Ancestry Resolution (`ancestry`)**: Walks parent references through
//!   explicit relative paths only, producing the ordered descriptor chain
//!   from the plugin up to the last locally resolvable ancestor.
//! - **Repository Layout (`layout`)**: Installs files into a repository root
//!   at their coordinate-derived paths.
//! - **Staging (`stage`)**: The `PluginStager` facade that composes the
//!   above with an external `Packager` to produce a ready-to-use repository.
//!
//! ## Execution Flow
//!
//! `PluginStager::prepare_for_testing` executes the following steps:
//!
//! 1.  Read the project descriptor (`pom.xml` in the project directory).
//! 2.  Stamp it with the test version and write it back to disk.
//! 3.  Invoke the packager to build the plugin artifact, capturing the
//!     build log.
//! 4.  Resolve the POM ancestry chain through relative-path parent links.
//! 5.  Install the packaged artifact and every descriptor in the chain into
//!     the target repository root (explicit, or the default transient one).
//! 6.  Return the repository root.
//!
//! ## Known Limitation
//!
//! Ancestor POMs that exist *only* in a general-purpose local repository and
//! are not reachable through a `<relativePath>` link are never resolved.
//! Staging happens before the plugin is installed anywhere resolvable, so
//! ancestry must come from explicit local links. Consumer test builds that
//! need such an ancestor will fail to resolve it; this is a documented
//! boundary of the design, not a silent fallback.

pub mod ancestry;
pub mod coordinate;
pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod stage;
pub mod stamp;
