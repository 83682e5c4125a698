//! Target dispatch and directory traversal.
//! Routes a single file straight to the substitution engine, or walks a
//! directory tree and processes every regular file under it.

use log::debug;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Result, StampError};
use crate::resolver::ReplacementMap;
use crate::substitute::process_file;

/// Applies the replacement map to the target path.
///
/// A nonexistent target is a no-op, not an error. A regular file is
/// processed directly; a directory is walked recursively and every
/// non-directory entry is processed with the same map.
///
/// The walk is sorted by file name so traversal order is deterministic.
/// The first failing entry aborts the run; files processed before it stay
/// mutated. Partial mutation on error is an explicit contract, there is no
/// rollback.
///
/// # Errors
/// * `StampError::IoError` on any traversal, read, or write failure
pub fn process_target<P: AsRef<Path>>(target: P, map: &ReplacementMap) -> Result<()> {
    let target = target.as_ref();
    if !target.exists() {
        debug!("Target {} does not exist, nothing to do", target.display());
        return Ok(());
    }

    if target.is_dir() {
        process_tree(target, map)
    } else {
        process_file(target, map)
    }
}

fn process_tree(root: &Path, map: &ReplacementMap) -> Result<()> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| StampError::IoError(e.into()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        process_file(entry.path(), map)?;
    }
    Ok(())
}
