//! Search-ceiling selection for the upward marker walk.
//!
//! Inside the user's tree the walk stops at the home directory; anywhere
//! else it stops at the filesystem root. Walking past home would pick up
//! unrelated markers from other users' trees, and walking the whole
//! filesystem from a system directory is never what the user wants.

use std::path::{Path, PathBuf};

/// Which ceiling applies to a given starting directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Starting path is home itself or nested under it.
    Home,
    /// Starting path lies outside the user's tree.
    Root,
}

impl Boundary {
    /// Classifies `start` against `home`. Comparison is component-wise,
    /// so `/home/user2` is not under `/home/user`.
    pub fn classify(start: &Path, home: &Path) -> Boundary {
        if start.starts_with(home) {
            Boundary::Home
        } else {
            Boundary::Root
        }
    }
}

/// Returns the directory at which the upward walk must stop.
///
/// There is no failure case: `root` is always a valid fallback ceiling.
pub fn resolve(start: &Path, home: &Path, root: &Path) -> PathBuf {
    match Boundary::classify(start, home) {
        Boundary::Home => home.to_path_buf(),
        Boundary::Root => root.to_path_buf(),
    }
}
