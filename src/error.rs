//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `stage-repo` library. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur while staging. Each variant corresponds to a specific failure
//!   mode and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! Every failure in this design is deterministic given the same inputs -
//! there is no transient-failure class and nothing is retried. The staging
//! facade wraps whatever went wrong into a single `Staging` error carrying
//! the originating cause and, when packaging was involved, the build-log
//! location for diagnosis.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stage-repo operations
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied test version is empty or not valid coordinate-version
    /// syntax. This is a caller error and is reported before anything is
    /// written to disk.
    #[error("Invalid test version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// A descriptor file could not be read or is not a well-formed POM.
    #[error("Failed to parse descriptor '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A parent reference resolved back to an already-visited descriptor
    /// file. The cycle field lists the visited files in traversal order.
    #[error("Cycle detected in descriptor ancestry: {cycle}")]
    CyclicAncestry { cycle: String },

    /// Packaging the plugin artifact failed.
    ///
    /// Includes the build-log location when one was captured.
    #[error("Packaging failed: {message}{}", log.as_ref().map(|l| format!("\n  build log: {}", l.display())).unwrap_or_default())]
    Build {
        message: String,
        /// Location of the captured build log, if any
        log: Option<PathBuf>,
    },

    /// A file could not be installed into the repository layout.
    #[error("Failed to install '{}' at '{}': {message}", src.display(), dst.display())]
    Install {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The wrapper reported by the staging facade: any failure during a
    /// staging call surfaces as this single error, with the underlying
    /// cause attached as the error source.
    #[error("Plugin staging failed: {source}{}", build_log.as_ref().map(|l| format!("\n  build log: {}", l.display())).unwrap_or_default())]
    Staging {
        /// Location of the build log, when packaging produced one
        build_log: Option<PathBuf>,
        #[source]
        source: Box<Error>,
    },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
