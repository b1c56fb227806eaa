//! Scatter placement: choosing where a new document file lands.
//!
//! A bounded random walk from the configured root. The walk depth is drawn
//! uniformly from `[0, max_depth]`, then each step lists the current
//! directory, picks one subdirectory at random, and probes it by listing it.
//! A failed probe (permission denied, race-deleted) skips that step and the
//! walk continues from the last good directory; placement never fails the
//! write. There is no backtracking.

use chrono::Utc;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Walk at most `max_depth` random steps below `root` and return the
/// directory the new file should be placed in.
pub fn choose_directory<R: Rng>(root: &Path, max_depth: usize, rng: &mut R) -> PathBuf {
    let depth = rng.gen_range(0..=max_depth);
    let mut current = root.to_path_buf();

    for _ in 0..depth {
        let Some(candidate) = pick_subdirectory(&current, rng) else {
            break;
        };

        // Probe: a directory we cannot list is one we cannot scan later.
        match fs::read_dir(&candidate) {
            Ok(_) => current = candidate,
            Err(err) => {
                trace!(dir = %candidate.display(), %err, "placement probe failed, staying put");
            }
        }
    }

    debug!(dir = %current.display(), depth, "placement chose directory");
    current
}

/// Uniformly pick an immediate subdirectory, or `None` when the listing
/// fails or the directory has no subdirectories.
fn pick_subdirectory<R: Rng>(dir: &Path, rng: &mut R) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            trace!(dir = %dir.display(), %err, "cannot list directory during placement");
            return None;
        }
    };

    let subdirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    if subdirs.is_empty() {
        return None;
    }
    Some(subdirs[rng.gen_range(0..subdirs.len())].clone())
}

/// Filename for a new document: `{epoch-millis}.{8-hex}{ext}`. The random
/// suffix keeps two writes in the same millisecond from colliding.
pub fn document_filename<R: Rng>(rng: &mut R, file_ext: &str) -> String {
    format!(
        "{}.{:08x}{}",
        Utc::now().timestamp_millis(),
        rng.gen::<u32>(),
        file_ext
    )
}
