//! The capability contract a queryable collection must offer.
//!
//! Pipelines are generic over this trait so they can run against any
//! engine that can intersect, exclude by identity, count and enumerate.

use crate::error::Result;
use crate::types::{Record, RecordId};

/// A composable, lazily evaluated description of a subset (and ordering)
/// of one collection.
///
/// Values are cheap handles: cloning a relation copies its description,
/// not the underlying rows.
pub trait Queryable: Clone + Send + Sync {
    type Item: Record;

    /// Intersect two descriptions of the same collection.
    ///
    /// The result keeps only rows matched by both sides. Orderings compose:
    /// `self`'s orderings are applied first, then `other`'s as tie-breakers.
    fn merge(&self, other: &Self) -> Result<Self>;

    /// Rows of `self` whose id does not occur in `other`.
    fn excluding(&self, other: &Self) -> Self;

    /// Ids of the matching rows, in enumeration order.
    fn ids(&self) -> Vec<RecordId>;

    /// Matching rows, in enumeration order.
    fn to_vec(&self) -> Vec<Self::Item>;

    fn count(&self) -> usize {
        self.ids().len()
    }

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
