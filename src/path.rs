//! Logical path handling.
//!
//! Logical paths alternate collection and document segments, Firestore-style:
//! `/users` is a collection, `/users/alice` a document,
//! `/users/alice/posts` a nested collection, and so on. The rule falls out
//! of the alternation: a **document** path has an even number of segments,
//! a **collection** path an odd number. Shape is checked once, when a query
//! ref is constructed, never again downstream.
//!
//! Paths are canonicalized on entry (`users//alice/` → `/users/alice`), so
//! stored `metadata.path` values compare bytewise and collection prefix
//! matching needs no further normalization.

use crate::error::{Result, StoreError};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// Placeholder token replaced with a fresh random ID at construction.
pub const AUTO_ID_TOKEN: &str = "{{AUTO_ID}}";

const AUTO_ID_LEN: usize = 25;

/// A validated, canonical logical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalPath {
    canonical: String,
    segment_count: usize,
}

impl LogicalPath {
    /// Parse and validate a document path (even, non-zero segment count).
    ///
    /// `{{AUTO_ID}}` tokens are substituted before validation, each with a
    /// fresh ID drawn from `rng`.
    pub fn document<R: Rng>(raw: &str, rng: &mut R) -> Result<Self> {
        let path = Self::parse(raw, rng);
        if path.segment_count == 0 || path.segment_count % 2 != 0 {
            return Err(StoreError::NotADocumentPath(raw.to_string()));
        }
        Ok(path)
    }

    /// Parse and validate a collection path (odd segment count).
    pub fn collection<R: Rng>(raw: &str, rng: &mut R) -> Result<Self> {
        let path = Self::parse(raw, rng);
        if path.segment_count % 2 != 1 {
            return Err(StoreError::NotACollectionPath(raw.to_string()));
        }
        Ok(path)
    }

    fn parse<R: Rng>(raw: &str, rng: &mut R) -> Self {
        let mut segments: Vec<String> = Vec::new();
        for segment in raw.split('/') {
            if segment.is_empty() {
                continue;
            }
            if segment.contains(AUTO_ID_TOKEN) {
                segments.push(segment.replace(AUTO_ID_TOKEN, &random_id(rng)));
            } else {
                segments.push(segment.to_string());
            }
        }
        Self {
            canonical: format!("/{}", segments.join("/")),
            segment_count: segments.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Raw string for a child path, one segment deeper. The result flips
    /// parity, so it is re-validated by whichever constructor receives it.
    pub fn child(&self, id: &str) -> String {
        format!("{}/{}", self.canonical, id)
    }

    /// The prefix every document inside this collection must carry.
    pub fn collection_prefix(&self) -> String {
        format!("{}/", self.canonical)
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// A fresh 25-character alphanumeric identifier.
pub fn random_id<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}
