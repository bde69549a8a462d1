//! Component implementations over listing tables.
//!
//! These components can be composed into a `FilterConfig` for any
//! `MemoryRelation<Listing>`, driven by a `ListingQuery`.

pub mod category;
pub mod min_quantity;
pub mod price_order;

use relation::{Listing, MemoryRelation};

// Re-export for convenience
pub use category::CategoryComponent;
pub use min_quantity::MinQuantityComponent;
pub use price_order::PriceDescendingComponent;

/// Relation type the listing components operate on
pub type Listings = MemoryRelation<Listing>;

/// Search parameters shared by every listing component.
///
/// Each field is optional; a component whose field is unset contributes
/// an unconditional relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub min_quantity: Option<i64>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_quantity(mut self, min_quantity: i64) -> Self {
        self.min_quantity = Some(min_quantity);
        self
    }
}
