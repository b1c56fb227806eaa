//! Bounded filesystem scan.
//!
//! There is no index: every read walks the subtree under the configured
//! root and looks at each candidate file. The traversal is an explicit
//! worklist with a depth counter. A directory whose listing fails
//! contributes nothing and is never followed, so a permission-denied branch
//! or a race-deleted directory silently shrinks the candidate set instead
//! of aborting the scan.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collect every file under `root` (at most `max_depth` directory levels
/// down) whose name ends in `file_ext`, in natural traversal order.
pub fn collect_files(root: &Path, max_depth: usize, file_ext: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut worklist: VecDeque<(PathBuf, usize)> = VecDeque::new();
    worklist.push_back((root.to_path_buf(), 0));

    while let Some((dir, depth)) = worklist.pop_front() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %dir.display(), %err, "skipping unlistable directory");
                continue;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                if depth < max_depth {
                    worklist.push_back((path, depth + 1));
                }
            } else if has_extension(&path, file_ext) {
                files.push(path);
            }
        }
    }

    files
}

fn has_extension(path: &Path, file_ext: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(file_ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn collects_matching_files_at_every_level() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("a/b")).unwrap();
        touch(&root.path().join("top.sdb"));
        touch(&root.path().join("a/mid.sdb"));
        touch(&root.path().join("a/b/deep.sdb"));
        touch(&root.path().join("a/other.txt"));

        let found = collect_files(root.path(), 5, ".sdb");
        let mut names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["deep.sdb", "mid.sdb", "top.sdb"]);
    }

    #[test]
    fn respects_the_depth_bound() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("a/b/c")).unwrap();
        touch(&root.path().join("a/one.sdb"));
        touch(&root.path().join("a/b/two.sdb"));
        touch(&root.path().join("a/b/c/three.sdb"));

        let found = collect_files(root.path(), 2, ".sdb");
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert!(names.contains(&"one.sdb"));
        assert!(names.contains(&"two.sdb"));
        assert!(!names.contains(&"three.sdb"));
    }

    #[test]
    fn missing_root_yields_no_candidates() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("never-created");
        assert!(collect_files(&gone, 3, ".sdb").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlinks_are_not_followed() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("real.sdb"));
        std::os::unix::fs::symlink(root.path().join("gone"), root.path().join("dangling")).unwrap();

        let found = collect_files(root.path(), 2, ".sdb");
        assert_eq!(found.len(), 1);
    }
}
