//! # Descriptor Parsing
//!
//! This module defines the `Descriptor` data model - a parsed build
//! descriptor (POM) for one coordinate - and the `DescriptorReader` trait
//! through which the rest of the library obtains descriptors.
//!
//! ## Design
//!
//! Parsing is a trait seam so the staging facade never depends on a
//! concrete parser. The default implementation, `PomReader`, reads a Maven
//! POM with the `xot` XML library and extracts only what staging needs:
//!
//! - the project's own coordinate (`groupId`/`artifactId`/`version`/
//!   `packaging`), with group and version inherited from the `<parent>`
//!   block when the POM omits them;
//! - the parent reference, including its relative-path link.
//!
//! ## Relative-Path Semantics
//!
//! A `<parent>` block without a `<relativePath>` element defaults to
//! `../pom.xml`, matching Maven. An explicitly *empty* `<relativePath/>`
//! means "do not resolve the parent locally" and yields a reference with
//! no path - ancestry traversal treats that as its boundary.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use xot::{Node, Xot};

/// A reference from a descriptor to its parent descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    /// The parent's coordinate. Parents are always descriptor (`pom`) files.
    pub coordinate: Coordinate,
    /// Filesystem path to the parent's descriptor file, relative to the
    /// directory containing the referring descriptor. `None` when the POM
    /// declares an empty `<relativePath/>`, which disables local
    /// resolution of the parent.
    pub relative_path: Option<PathBuf>,
}

/// A parsed build descriptor for one coordinate.
///
/// Read-only to this library except for the version field of its
/// coordinate, which the stamper rewrites before packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// The coordinate this descriptor declares.
    pub coordinate: Coordinate,
    /// The parent reference, if the descriptor declares one.
    pub parent: Option<ParentRef>,
    /// The file this descriptor was parsed from.
    pub source: PathBuf,
}

impl Descriptor {
    /// Returns the directory containing this descriptor's source file.
    ///
    /// Relative parent paths are resolved against this directory.
    pub fn directory(&self) -> &Path {
        self.source.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Trait for descriptor parsing - allows mocking in tests
pub trait DescriptorReader {
    /// Parses the descriptor file at `path`.
    fn read(&self, path: &Path) -> Result<Descriptor>;
}

/// The default `DescriptorReader`, which parses Maven POM files.
pub struct PomReader;

impl DescriptorReader for PomReader {
    fn read(&self, path: &Path) -> Result<Descriptor> {
        let xml = fs::read_to_string(path).map_err(|e| parse_error(path, e.to_string()))?;

        let mut xot = Xot::new();
        let document = xot
            .parse(&xml)
            .map_err(|e| parse_error(path, e.to_string()))?;
        let project = xot
            .document_element(document)
            .map_err(|e| parse_error(path, e.to_string()))?;

        let parent = read_parent(&xot, project, path)?;

        let artifact_id = child_text(&xot, project, "artifactId")
            .ok_or_else(|| parse_error(path, "missing <artifactId>"))?;
        let group_id = child_text(&xot, project, "groupId")
            .or_else(|| parent.as_ref().map(|p| p.coordinate.group_id.clone()))
            .ok_or_else(|| parse_error(path, "missing <groupId> and no <parent> to inherit it from"))?;
        let version = child_text(&xot, project, "version")
            .or_else(|| parent.as_ref().map(|p| p.coordinate.version.clone()))
            .ok_or_else(|| parse_error(path, "missing <version> and no <parent> to inherit it from"))?;
        let packaging =
            child_text(&xot, project, "packaging").unwrap_or_else(|| "jar".to_string());

        let coordinate = Coordinate::new(group_id, artifact_id, version, artifact_extension(&packaging));

        Ok(Descriptor {
            coordinate,
            parent,
            source: path.to_path_buf(),
        })
    }
}

/// Maps a POM packaging value to the extension of the file it produces.
///
/// Plugin projects package as `maven-plugin` but still build a jar.
fn artifact_extension(packaging: &str) -> String {
    match packaging {
        "maven-plugin" => "jar".to_string(),
        other => other.to_string(),
    }
}

fn read_parent(xot: &Xot, project: Node, path: &Path) -> Result<Option<ParentRef>> {
    let Some(parent) = child_element(xot, project, "parent") else {
        return Ok(None);
    };

    let group_id = child_text(xot, parent, "groupId")
        .ok_or_else(|| parse_error(path, "<parent> is missing <groupId>"))?;
    let artifact_id = child_text(xot, parent, "artifactId")
        .ok_or_else(|| parse_error(path, "<parent> is missing <artifactId>"))?;
    let version = child_text(xot, parent, "version")
        .ok_or_else(|| parse_error(path, "<parent> is missing <version>"))?;

    // Absent <relativePath> defaults to ../pom.xml; an explicitly empty
    // element disables local resolution entirely.
    let relative_path = match child_element(xot, parent, "relativePath") {
        None => Some(PathBuf::from("../pom.xml")),
        Some(element) => {
            let text = element_text(xot, element);
            if text.is_empty() {
                None
            } else {
                Some(PathBuf::from(text))
            }
        }
    };

    Ok(Some(ParentRef {
        coordinate: Coordinate::new(group_id, artifact_id, version, "pom"),
        relative_path,
    }))
}

/// Finds the first child element of `node` with the given local name,
/// ignoring namespaces (POMs may or may not carry the model namespace).
pub(crate) fn child_element(xot: &Xot, node: Node, local_name: &str) -> Option<Node> {
    xot.children(node).find(|&child| {
        xot.element(child)
            .map(|element| xot.name_ns_str(element.name()).0 == local_name)
            .unwrap_or(false)
    })
}

/// Returns the trimmed text content of an element, or the empty string.
pub(crate) fn element_text(xot: &Xot, node: Node) -> String {
    xot.text_content_str(node)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Returns the trimmed text of the named child element, if present and
/// non-empty.
pub(crate) fn child_text(xot: &Xot, node: Node, local_name: &str) -> Option<String> {
    let element = child_element(xot, node, local_name)?;
    let text = element_text(xot, element);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub(crate) fn parse_error(path: &Path, message: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}
