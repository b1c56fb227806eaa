use super::{placement, scan};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::model::{DocMetadata, Document, DocumentData};
use crate::path::LogicalPath;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::trace;
use uuid::Uuid;

/// Filesystem-backed document store: placement, codec, and lookup.
///
/// Owns the random source. The mutex only keeps the store `Sync`; it is not
/// a concurrency-coordination mechanism; writers still race (documented
/// behavior).
#[derive(Debug)]
pub struct FileStore {
    config: StoreConfig,
    rng: Mutex<StdRng>,
}

impl FileStore {
    pub fn new(config: StoreConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    /// Parse one document file. Callers scanning candidates treat any error
    /// here as "this file does not count".
    pub fn read_document(path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path)?;
        let doc: Document = serde_json::from_str(&content)?;
        Ok(doc)
    }

    /// Serialize `doc` at `doc.location`, atomically (temp file + rename),
    /// overwriting any file already there.
    fn write_document(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        let parent = doc.location.parent().unwrap_or(&self.config.root);
        let tmp = parent.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &doc.location)?;
        Ok(())
    }

    /// Create a new document for `logical` at a freshly placed location.
    pub fn create(&self, logical: &LogicalPath, data: DocumentData) -> Result<Document> {
        self.ensure_root()?;
        let dir = self.with_rng(|rng| {
            placement::choose_directory(&self.config.root, self.config.max_depth, rng)
        });
        let filename = self.with_rng(|rng| placement::document_filename(rng, &self.config.file_ext));

        let doc = Document {
            location: dir.join(filename),
            metadata: DocMetadata::new(logical.as_str().to_string()),
            data,
        };
        self.write_document(&doc)?;
        Ok(doc)
    }

    /// Rewrite an existing document in place, keeping its location.
    pub fn rewrite(&self, doc: &Document) -> Result<()> {
        self.write_document(doc)
    }

    /// Scan for the document with exactly this logical path. First match
    /// wins; order is the scan's natural traversal order.
    pub fn find_document(&self, logical: &LogicalPath) -> Option<Document> {
        for path in self.candidates() {
            match Self::read_document(&path) {
                Ok(doc) if doc.metadata.path == logical.as_str() => return Some(doc),
                Ok(_) => {}
                Err(err) => {
                    trace!(file = %path.display(), %err, "skipping unparsable candidate");
                }
            }
        }
        None
    }

    /// Scan for every document whose logical path starts with `prefix`
    /// (a collection path plus trailing slash).
    pub fn scan_prefix(&self, prefix: &str) -> Vec<Document> {
        let mut docs = Vec::new();
        for path in self.candidates() {
            match Self::read_document(&path) {
                Ok(doc) if doc.metadata.path.starts_with(prefix) => docs.push(doc),
                Ok(_) => {}
                Err(err) => {
                    trace!(file = %path.display(), %err, "skipping unparsable candidate");
                }
            }
        }
        docs
    }

    /// Unlink a document file.
    pub fn remove(&self, location: &Path) -> Result<()> {
        fs::remove_file(location)?;
        Ok(())
    }

    fn candidates(&self) -> Vec<std::path::PathBuf> {
        scan::collect_files(&self.config.root, self.config.max_depth, &self.config.file_ext)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.config.root.exists() {
            fs::create_dir_all(&self.config.root)?;
        }
        Ok(())
    }
}
