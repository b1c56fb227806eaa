//! # Storage Layer
//!
//! Documents live as individual JSON files scattered across a bounded
//! filesystem subtree. There is no index and no central manifest: the file
//! *is* the record, and the embedded `metadata.path` is the only link back
//! to the logical namespace.
//!
//! ## Write path
//!
//! 1. [`placement`] performs a bounded random walk below the configured
//!    root and picks a parent directory.
//! 2. [`fs::FileStore`] serializes the document and writes it atomically
//!    (temp file + rename) under a `{epoch-millis}.{hex}{ext}` name.
//!
//! ## Read path
//!
//! 1. [`scan`] enumerates every candidate file within the depth bound,
//!    skipping unlistable branches.
//! 2. [`fs::FileStore`] parses candidates tolerantly and matches
//!    `metadata.path`: equality for a document lookup (first match wins),
//!    prefix for a collection lookup.
//!
//! The deal this design makes: placement unpredictability is bought with
//! scan-proportional reads. Both halves honor the same depth bound, so
//! anything placement can write, a scan can find.

pub mod fs;
pub mod placement;
pub mod scan;

pub use fs::FileStore;
