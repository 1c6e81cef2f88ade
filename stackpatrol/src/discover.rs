//! Stack discovery.
//!
//! Recursively walks a base directory for compose files. The walk is lazy and
//! tolerant: unreadable subdirectories are skipped rather than aborting the
//! scan, so one bad mount never hides the rest of the host's stacks.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File names recognized as a stack definition, in precedence order.
pub const COMPOSE_FILE_NAMES: &[&str] = &[
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Yield the path of every compose file under `base`, depth-first, at most
/// one per directory. Traversal order follows the filesystem and is not
/// stable across runs.
pub fn find_compose_files(base: &Path) -> impl Iterator<Item = PathBuf> {
    let mut seen_dirs: HashSet<PathBuf> = HashSet::new();

    WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && COMPOSE_FILE_NAMES
                    .iter()
                    .any(|name| entry.file_name() == *name)
        })
        .filter(move |entry| match entry.path().parent() {
            Some(dir) => seen_dirs.insert(dir.to_path_buf()),
            None => false,
        })
        .map(|entry| entry.into_path())
}
