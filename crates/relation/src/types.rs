//! Core domain types shared by every relation.
//!
//! - `RecordId`: the stable identity key rows are compared by
//! - `Record`: anything that can live in a `Table`
//! - `Direction`: sort direction for key-based orderings
//! - `Listing`: the sample row type used by fixtures and the CLI

use serde::{Deserialize, Serialize};

// =============================================================================
// Identity
// =============================================================================

/// Unique identifier for a row within its table
pub type RecordId = u64;

/// A row that can be stored in a `Table` and tracked through a pipeline.
///
/// Membership tests ("which rows were removed by this step") compare ids,
/// never values, so two rows with equal fields but different ids are
/// distinct and reordering a relation never changes its membership.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}

/// Sort direction for `MemoryRelation::order_by_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

// =============================================================================
// Listing
// =============================================================================

/// A marketplace listing: one category label and two numeric attributes.
///
/// Fixture format: `id::category::price::quantity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: RecordId,
    pub category: String,
    pub price: i64,
    pub quantity: i64,
}

impl Listing {
    pub fn new(id: RecordId, category: impl Into<String>, price: i64, quantity: i64) -> Self {
        Self {
            id,
            category: category.into(),
            price,
            quantity,
        }
    }
}

impl Record for Listing {
    fn id(&self) -> RecordId {
        self.id
    }
}
