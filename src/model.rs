//! Core data types: [`Document`], [`DocMetadata`], and [`Collection`].
//!
//! A document is the unit of storage. Its identity has two halves:
//!
//! - `metadata.path`: the **logical path** applications address it by
//!   (e.g. `/users/AbC123`). Unique per document; the sole correlation key
//!   used when scanning the filesystem.
//! - `location`: the **storage location**, an absolute path chosen at
//!   random when the document is created. In-place rewrites keep it; it is
//!   never derivable from the logical path (that unpredictability is the
//!   point of the store).
//!
//! `data` is an open, insertion-ordered mapping from field name to any
//! JSON-compatible value. There is no schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// The open field mapping of a document. Keys keep insertion order.
pub type DocumentData = serde_json::Map<String, Value>;

/// Per-document metadata, persisted alongside the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocMetadata {
    /// Canonical logical path, e.g. `/users/AbC123`.
    pub path: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl DocMetadata {
    pub fn new(path: String) -> Self {
        let now = Utc::now();
        Self {
            path,
            created: now,
            last_modified: now,
        }
    }
}

/// A stored document: where it lives, what it is called, what it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Absolute filesystem path of the backing file.
    pub location: PathBuf,
    pub metadata: DocMetadata,
    pub data: DocumentData,
}

impl Document {
    /// Fetch a field value, following dotted keys into nested objects.
    pub fn field(&self, key: &str) -> Option<&Value> {
        crate::fields::get_path(&self.data, key)
    }
}

/// A read-only, derived view: the documents whose logical path sits under a
/// collection path, after filtering, sorting, and pagination.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Canonical logical path of the collection, e.g. `/users`.
    pub path: String,
    pub documents: Vec<Document>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
