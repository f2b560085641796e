//! Deterministic member location within an extracted archive tree.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Search `root` recursively for a file named `target`.
///
/// Traversal order is fixed so duplicate names resolve identically on every
/// platform and every run: within each directory, entries are sorted
/// byte-lexically by file name, files are visited before subdirectories, and
/// the first match wins. Well-formed UDF archives contain at most one match,
/// so the tie-break only matters for malformed inputs.
///
/// Hidden entries (names starting with `.`) are skipped, files and
/// directories alike.
///
/// # Returns
/// `Ok(Some(path))` for the first match, `Ok(None)` when the tree holds no
/// such file. Absence is a legitimate negative result, not an error;
/// `Err` is reserved for filesystem failures during traversal.
pub fn locate_member<P: AsRef<Path>>(root: P, target: &str) -> Result<Option<PathBuf>> {
    locate_in_dir(root.as_ref(), target)
}

fn locate_in_dir(dir: &Path, target: &str) -> Result<Option<PathBuf>> {
    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else {
            files.push(path);
        }
    }

    files.sort();
    subdirs.sort();

    for file in files {
        if file.file_name().is_some_and(|n| n == target) {
            return Ok(Some(file));
        }
    }
    for subdir in subdirs {
        if let Some(found) = locate_in_dir(&subdir, target)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
