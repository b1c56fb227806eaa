//! # scatterdb
//!
//! A toy document store that hides each JSON document at a **randomly
//! chosen location** inside a bounded filesystem subtree, and finds it
//! again by **scanning**. There is no index, no manifest, no predictable
//! layout. Placement unpredictability is the feature; scan-proportional
//! reads are the price.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade (api.rs)                                            │
//! │  - document(path) / collection(path) entry points           │
//! │  - fluent query building, sentinel resolution on writes     │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │  Query Engine (query/)   │   │  Write Model (fields.rs)     │
//! │  - filter conditions     │   │  - FieldValue sentinels      │
//! │  - stable sort + paging  │   │  - dotted-path assignment    │
//! └──────────────────────────┘   └──────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - placement: bounded random walk below the root            │
//! │  - scan: depth-bounded worklist traversal, skip-tolerant    │
//! │  - fs: atomic JSON codec, lookup by embedded logical path   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logical paths
//!
//! Documents and collections share one namespace, alternating segment by
//! segment: `/users` (collection) → `/users/ada` (document) →
//! `/users/ada/posts` (collection). Shape is validated when a ref is
//! constructed; `{{AUTO_ID}}` placeholders become fresh 25-character
//! random IDs at the same moment.
//!
//! ## What this store does not do
//!
//! No durability beyond the filesystem's own write semantics, no
//! concurrent-writer coordination, no schema, no transactions. Two writers
//! racing on one logical path is last-writer-wins. Every operation re-reads
//! disk; nothing is cached between calls.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade: [`Database`], [`DocumentRef`], [`CollectionRef`]
//! - [`query`]: Filter conditions, sorting, pagination
//! - [`fields`]: Write payloads and sentinel field values
//! - [`model`]: Core data types ([`Document`], [`Collection`])
//! - [`path`]: Logical path validation and AUTO_ID resolution
//! - [`store`]: Placement walk, bounded scan, file codec
//! - [`config`]: Store configuration
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod fields;
pub mod model;
pub mod path;
pub mod query;
pub mod store;

pub use api::{CollectionRef, Database, DocumentRef};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use fields::{FieldValue, WriteData};
pub use model::{Collection, DocMetadata, Document, DocumentData};
pub use query::{Condition, Direction, OrderBy, QueryFilter};
