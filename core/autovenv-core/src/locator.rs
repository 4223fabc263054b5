//! Marker directory search by walking up from a starting directory.
//!
//! # Algorithm
//!
//! 1. Test `current/<marker>` at the starting directory.
//! 2. On a hit, return that path immediately - the nearest marker wins
//!    over any marker further up.
//! 3. Once the stop directory has been tested, the search ends; otherwise
//!    move to the parent and repeat.
//!
//! Each directory on the way up is tested exactly once, the stop
//! directory included. When `start == stop` only that single test runs.
//! Parents are plain path arithmetic; symlinks are not followed mid-walk
//! (callers canonicalize the starting path once, up front).

use std::path::{Path, PathBuf};

/// Marker directory name identifying an environment root.
pub const DEFAULT_MARKER: &str = ".venv";

/// Walks upward from `start` to `stop` (inclusive) and returns the first
/// marker directory found, nearest ancestor first.
///
/// Returns `None` when no directory on the way up contains the marker.
/// Not finding a marker is a normal outcome, not an error.
pub fn find_marker(start: &Path, stop: &Path, marker: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if let Some(found) = marker_at(current, marker) {
            return Some(found);
        }
        if current == stop {
            return None;
        }
        match current.parent() {
            Some(parent) => current = parent,
            // Reached the filesystem root without passing stop; the root
            // itself was already tested above.
            None => return None,
        }
    }
}

/// Tests whether `dir/<marker>` exists as a directory, returning its path.
fn marker_at(dir: &Path, marker: &str) -> Option<PathBuf> {
    let candidate = dir.join(marker);
    candidate.is_dir().then_some(candidate)
}
