//! # Query Facade
//!
//! The only entry points callers get: [`Database::document`] and
//! [`Database::collection`]. Both validate the logical path's shape once,
//! at construction, and resolve `{{AUTO_ID}}` placeholders; everything
//! downstream works with a canonical [`LogicalPath`].
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Validates** path shape (document = even segments, collection = odd)
//! - **Resolves sentinels** against the current stored document before any
//!   write reaches disk
//! - **Composes** placement, scanning, and the query pipeline into the
//!   public verbs (`get`, `set`, `update`, `delete`, `add`)
//!
//! It does not buffer, cache, or index anything: every operation re-reads
//! the filesystem.
//!
//! ## Builder style
//!
//! [`CollectionRef`] builder methods consume and return the ref, so a query
//! is an expression, not hidden mutable state:
//!
//! ```no_run
//! use scatterdb::{Condition, Database, Direction, StoreConfig, WriteData};
//!
//! # fn main() -> scatterdb::Result<()> {
//! let db = Database::new(StoreConfig::new().root("/var/lib/scatter").max_depth(3));
//!
//! db.document("users/ada")?
//!     .set(WriteData::new().field("name", "Ada").field("age", 36))?;
//!
//! let adults = db
//!     .collection("users")?
//!     .filter("age", Condition::Ge, 18)
//!     .order_by("name", Direction::Ascending)
//!     .limit(10)
//!     .get()?;
//! # let _ = adults;
//! # Ok(())
//! # }
//! ```

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::fields::{set_path, FieldValue, WriteData};
use crate::model::{Collection, Document, DocumentData};
use crate::path::{LogicalPath, AUTO_ID_TOKEN};
use crate::query::{Condition, Direction, OrderBy, QueryFilter, QueryOptions};
use crate::store::FileStore;
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::debug;

/// Handle to a scatter-placement document store rooted at one directory.
pub struct Database {
    store: FileStore,
}

impl Database {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            store: FileStore::new(config),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        self.store.config()
    }

    /// A reference to the document at `path` (even segment count).
    pub fn document(&self, path: &str) -> Result<DocumentRef<'_>> {
        let path = self.store.with_rng(|rng| LogicalPath::document(path, rng))?;
        Ok(DocumentRef {
            store: &self.store,
            path,
        })
    }

    /// A query over the collection at `path` (odd segment count).
    pub fn collection(&self, path: &str) -> Result<CollectionRef<'_>> {
        let path = self
            .store
            .with_rng(|rng| LogicalPath::collection(path, rng))?;
        Ok(CollectionRef {
            store: &self.store,
            path,
            options: QueryOptions::default(),
        })
    }
}

/// A validated reference to one document.
#[derive(Debug)]
pub struct DocumentRef<'a> {
    store: &'a FileStore,
    path: LogicalPath,
}

impl<'a> DocumentRef<'a> {
    /// The canonical logical path this ref points at.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Scan for the document. `None` when nothing within the depth bound
    /// carries this logical path.
    pub fn get(&self) -> Result<Option<Document>> {
        Ok(self.store.find_document(&self.path))
    }

    /// Write the document: resolve sentinels against whatever currently
    /// exists at this path, place a new file, then unlink the old one.
    pub fn set(&self, data: impl Into<WriteData>) -> Result<Document> {
        let existing = self.store.find_document(&self.path);
        let resolved = data
            .into()
            .resolve_against(existing.as_ref().map(|doc| &doc.data), Utc::now())?;

        let mut fields = DocumentData::new();
        for (key, value) in resolved {
            set_path(&mut fields, &key, value);
        }

        let doc = self.store.create(&self.path, fields)?;

        // Replace policy: one live file per logical path. Cleanup is
        // best-effort; a racing deleter may have gotten there first.
        if let Some(old) = existing {
            if old.location != doc.location {
                if let Err(err) = self.store.remove(&old.location) {
                    debug!(file = %old.location.display(), %err, "could not unlink replaced file");
                }
            }
        }

        Ok(doc)
    }

    /// Merge fields into the existing document, in place. Fails with
    /// [`StoreError::NotFound`] when no document exists at this path.
    pub fn update(&self, data: impl Into<WriteData>) -> Result<Document> {
        let mut doc = self
            .store
            .find_document(&self.path)
            .ok_or_else(|| StoreError::NotFound(self.path.to_string()))?;

        // Strictly later than the stored stamp, even on a coarse clock.
        let now = Utc::now().max(doc.metadata.last_modified + Duration::microseconds(1));

        let resolved = data.into().resolve_against(Some(&doc.data), now)?;
        for (key, value) in resolved {
            set_path(&mut doc.data, &key, value);
        }
        doc.metadata.last_modified = now;

        self.store.rewrite(&doc)?;
        Ok(doc)
    }

    /// Single-field [`DocumentRef::update`]; the key may be dotted.
    pub fn update_field(
        &self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<Document> {
        self.update(WriteData::new().field(field, value))
    }

    /// Unlink the document's file. No-op when the document is absent.
    pub fn delete(&self) -> Result<()> {
        if let Some(doc) = self.store.find_document(&self.path) {
            self.store.remove(&doc.location)?;
        }
        Ok(())
    }

    /// A nested collection under this document.
    pub fn collection(&self, id: &str) -> Result<CollectionRef<'a>> {
        let child = self.path.child(id);
        let path = self
            .store
            .with_rng(|rng| LogicalPath::collection(&child, rng))?;
        Ok(CollectionRef {
            store: self.store,
            path,
            options: QueryOptions::default(),
        })
    }
}

/// A collection query: path plus accumulated filter/sort/page settings.
#[derive(Debug)]
pub struct CollectionRef<'a> {
    store: &'a FileStore,
    path: LogicalPath,
    options: QueryOptions,
}

impl<'a> CollectionRef<'a> {
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Add a field predicate. All predicates must hold (conjunction).
    pub fn filter(
        mut self,
        field: impl Into<String>,
        condition: Condition,
        value: impl Into<Value>,
    ) -> Self {
        self.options
            .filters
            .push(QueryFilter::new(field, condition, value));
        self
    }

    /// Sort by one field. Without this, results stay in scan order.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.options.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.options.offset = offset;
        self
    }

    /// Run the scan and the filter → sort → page pipeline.
    pub fn get(&self) -> Result<Collection> {
        let candidates = self.store.scan_prefix(&self.path.collection_prefix());
        Ok(Collection {
            path: self.path.to_string(),
            documents: self.options.apply(candidates),
        })
    }

    /// Delete every document currently matched by this query. The match set
    /// is re-evaluated now, not cached from an earlier `get`. Returns the
    /// number of files actually unlinked.
    pub fn delete(&self) -> Result<usize> {
        let candidates = self.store.scan_prefix(&self.path.collection_prefix());
        let mut removed = 0;
        for doc in self.options.apply(candidates) {
            match self.store.remove(&doc.location) {
                Ok(()) => removed += 1,
                Err(err) => {
                    debug!(file = %doc.location.display(), %err, "matched file vanished before delete");
                }
            }
        }
        Ok(removed)
    }

    /// A document inside this collection.
    pub fn document(&self, id: &str) -> Result<DocumentRef<'a>> {
        let child = self.path.child(id);
        let path = self.store.with_rng(|rng| LogicalPath::document(&child, rng))?;
        Ok(DocumentRef {
            store: self.store,
            path,
        })
    }

    /// Create a child document under a fresh random ID.
    pub fn add(&self, data: impl Into<WriteData>) -> Result<Document> {
        self.document(AUTO_ID_TOKEN)?.set(data)
    }
}
