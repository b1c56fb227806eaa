//! Store configuration.
//!
//! Three knobs shape the store's relationship with the filesystem:
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root` | user home dir | Base of the placement walk and of every scan |
//! | `max_depth` | `4` | Maximum directory levels below the root |
//! | `file_ext` | `.sdb` | Extension of document files |
//!
//! `seed` additionally pins the random source, making placement and
//! generated IDs reproducible; tests rely on it. These are environment-level
//! choices: nothing about them is stored inside documents.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_FILE_EXT: &str = ".sdb";
const DEFAULT_MAX_DEPTH: usize = 4;

/// Configuration for a [`crate::Database`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory for placement and scanning.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Maximum walk/scan depth below the root.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Extension for document files (e.g. ".sdb")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Seed for the random source. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_root() -> PathBuf {
    // Home directory when resolvable, filesystem root otherwise.
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_depth: DEFAULT_MAX_DEPTH,
            file_ext: DEFAULT_FILE_EXT.to_string(),
            seed: None,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the file extension (normalizes to start with a dot).
    pub fn file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
