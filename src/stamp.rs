//! # Version Stamping
//!
//! Rewrites a descriptor's own declared version to a supplied stable
//! test-time version, on disk, so that test-build POMs can reference the
//! plugin under a fixed coordinate.
//!
//! The stamped descriptor must be persisted back to its source file before
//! packaging is invoked: the packager reads the descriptor from disk, not
//! from memory. `stamp_version` performs that write itself, which makes the
//! write-before-package ordering a precondition the orchestrator can rely
//! on rather than an incidental side effect.
//!
//! Only the project's own identity version is touched. Dependency versions
//! and the `<parent>` block are left exactly as declared - the design
//! deliberately does not attempt dependency-graph-wide version
//! substitution, and ancestry resolution depends on the parent link staying
//! intact.

use crate::coordinate::validate_version;
use crate::descriptor::{child_element, parse_error, Descriptor};
use crate::error::Result;
use log::debug;
use std::fs;
use std::path::Path;
use xot::{Node, Xot};

/// Rewrites `descriptor`'s own version to `test_version`.
///
/// Validates the version, rewrites the `<version>` element of the POM on
/// disk (inserting one if the POM inherits its version from its parent),
/// and updates the in-memory coordinate to match. Fails with
/// `InvalidVersion` before touching the file if the version is empty or
/// malformed.
pub fn stamp_version(descriptor: &mut Descriptor, test_version: &str) -> Result<()> {
    validate_version(test_version)?;

    let path = descriptor.source.clone();
    let xml = fs::read_to_string(&path).map_err(|e| parse_error(&path, e.to_string()))?;

    let mut xot = Xot::new();
    let document = xot
        .parse(&xml)
        .map_err(|e| parse_error(&path, e.to_string()))?;
    let project = xot
        .document_element(document)
        .map_err(|e| parse_error(&path, e.to_string()))?;

    match child_element(&xot, project, "version") {
        Some(version) => set_element_text(&mut xot, version, test_version, &path)?,
        None => insert_version_element(&mut xot, project, test_version, &path)?,
    }

    let stamped = xot
        .to_string(document)
        .map_err(|e| parse_error(&path, e.to_string()))?;
    fs::write(&path, stamped)?;

    debug!(
        "stamped {} as version {} in {}",
        descriptor.coordinate,
        test_version,
        path.display()
    );
    descriptor.coordinate.version = test_version.to_string();
    Ok(())
}

/// Replaces the text content of an element, or appends a text node to an
/// element that has none (e.g. `<version></version>`).
fn set_element_text(xot: &mut Xot, node: Node, value: &str, path: &Path) -> Result<()> {
    if let Some(text) = xot.text_content_mut(node) {
        text.set(value);
        return Ok(());
    }
    let text = xot.new_text(value);
    xot.append(node, text)
        .map_err(|e| parse_error(path, e.to_string()))?;
    Ok(())
}

/// Inserts a `<version>` element under the project root, in the project's
/// own namespace, for POMs that inherit their version from the parent.
fn insert_version_element(
    xot: &mut Xot,
    project: Node,
    value: &str,
    path: &Path,
) -> Result<()> {
    let namespace = xot
        .element(project)
        .map(|element| xot.name_ns_str(element.name()).1.to_string())
        .unwrap_or_default();

    let name = if namespace.is_empty() {
        xot.add_name("version")
    } else {
        let namespace_id = xot.add_namespace(&namespace);
        xot.add_name_ns("version", namespace_id)
    };

    let version = xot.new_element(name);
    xot.append(project, version)
        .map_err(|e| parse_error(path, e.to_string()))?;
    let text = xot.new_text(value);
    xot.append(version, text)
        .map_err(|e| parse_error(path, e.to_string()))?;
    Ok(())
}
