//! # Query Engine
//!
//! Collection reads run a fixed pipeline over the candidate documents the
//! scanner produced:
//!
//! 1. **Filter**: keep documents satisfying *every* [`QueryFilter`]
//!    (conjunction). Predicates are per-document and stateless; an absent or
//!    type-incompatible field fails the predicate silently.
//! 2. **Sort**: optional single-field [`OrderBy`], ascending or descending.
//!    The sort is stable; documents whose sort key is absent or incomparable
//!    compare equal and keep their scan order.
//! 3. **Page**: `offset` then `limit`, a half-open window over the sorted
//!    sequence. Defaults: offset 0, no limit.
//!
//! Without `orderBy`, results stay in scan order, which is the traversal
//! order of a random filesystem walk, so callers wanting a reproducible
//! order must sort.

use crate::model::Document;
use std::cmp::Ordering;

pub mod filter;
pub(crate) mod value;

pub use filter::{Condition, QueryFilter};

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A single-field sort instruction.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// The assembled configuration of one collection read.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub filters: Vec<QueryFilter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl QueryOptions {
    /// Run the filter → sort → page pipeline.
    pub fn apply(&self, mut docs: Vec<Document>) -> Vec<Document> {
        docs.retain(|doc| self.filters.iter().all(|f| f.matches(&doc.data)));

        if let Some(order) = &self.order_by {
            docs.sort_by(|a, b| {
                let ordering = match (a.field(&order.field), b.field(&order.field)) {
                    (Some(x), Some(y)) => value::compare(x, y).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        let window = docs.into_iter().skip(self.offset);
        match self.limit {
            Some(n) => window.take(n).collect(),
            None => window.collect(),
        }
    }
}
