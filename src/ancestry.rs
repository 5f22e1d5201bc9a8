//! # Ancestry Resolution
//!
//! Walks a descriptor's parent references through explicit relative-path
//! links, producing the ordered chain from the plugin's own descriptor up
//! to the last locally resolvable ancestor.
//!
//! ## Resolvability Boundary
//!
//! Staging happens before the plugin is installed anywhere a build tool
//! could resolve it, so ancestry must be resolved purely from local,
//! explicit links - no remote lookup, no general-purpose local cache. The
//! first parent reference that has no relative path, or whose resolved
//! path does not exist, ends the chain quietly: that boundary is a defined
//! outcome, not a failure. A parentless descriptor yields a chain of one.
//!
//! ## Cycle Guard
//!
//! The traversal is an explicit loop over a finite filesystem hierarchy,
//! but malformed inputs can make a parent point back at an already-visited
//! file. A visited set of canonical paths catches that and fails with
//! `CyclicAncestry` instead of looping forever.

use crate::descriptor::{Descriptor, DescriptorReader};
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashSet;
use std::path::PathBuf;

/// Resolves the ancestry chain of `start`.
///
/// The returned chain always begins with `start` itself and contains every
/// ancestor reachable through relative-path parent links, in order.
pub fn resolve_ancestry(
    start: &Descriptor,
    reader: &dyn DescriptorReader,
) -> Result<Vec<Descriptor>> {
    let mut chain = vec![start.clone()];
    let mut visited: HashSet<PathBuf> = HashSet::new();
    if let Ok(canonical) = start.source.canonicalize() {
        visited.insert(canonical);
    }

    loop {
        let current = chain.last().expect("chain starts non-empty");

        let Some(parent) = &current.parent else {
            break;
        };
        let Some(relative) = &parent.relative_path else {
            debug!(
                "parent {} of {} declares no relative path; ancestry stops here",
                parent.coordinate, current.coordinate
            );
            break;
        };

        let mut candidate = current.directory().join(relative);
        // A relative path may name the parent project directory rather
        // than its descriptor file.
        if candidate.is_dir() {
            candidate = candidate.join("pom.xml");
        }
        if !candidate.is_file() {
            debug!(
                "parent {} of {} is not resolvable at {}; ancestry stops here",
                parent.coordinate,
                current.coordinate,
                candidate.display()
            );
            break;
        }

        let canonical = match candidate.canonicalize() {
            Ok(canonical) => canonical,
            Err(e) => {
                debug!(
                    "could not canonicalize parent path {}: {}; ancestry stops here",
                    candidate.display(),
                    e
                );
                break;
            }
        };

        if !visited.insert(canonical.clone()) {
            let mut cycle: Vec<String> = chain
                .iter()
                .map(|descriptor| descriptor.source.display().to_string())
                .collect();
            cycle.push(canonical.display().to_string());
            return Err(Error::CyclicAncestry {
                cycle: cycle.join(" -> "),
            });
        }

        let ancestor = reader.read(&candidate)?;
        chain.push(ancestor);
    }

    Ok(chain)
}
