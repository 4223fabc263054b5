//! Marker lookup without side effects, for scripting and debugging.
//!
//! Prints the marker directory a scan from the given path would activate.
//! Not finding one is a normal outcome reported through the exit code,
//! not a diagnostic.

use std::path::{Path, PathBuf};

use autovenv_core::{boundary, config, locator};

use crate::scan::canonicalized;

pub fn run(path: &str) -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let config = config::load_config();

    let cwd = canonicalized(Path::new(path));
    let home = canonicalized(&home);
    let stop = boundary::resolve(&cwd, &home, Path::new("/"));
    locator::find_marker(&cwd, &stop, &config.marker)
}
