//! Ordering-only component: most expensive first.

use super::{ListingQuery, Listings};
use crate::error::Result;
use crate::traits::{Component, FromParams};
use relation::Direction;

/// Orders listings by price, highest first. Never removes a row.
pub struct PriceDescendingComponent;

impl FromParams<ListingQuery> for PriceDescendingComponent {
    fn from_params(_params: Option<&ListingQuery>) -> Self {
        PriceDescendingComponent
    }
}

impl Component<Listings> for PriceDescendingComponent {
    fn name(&self) -> &str {
        "PriceDescendingComponent"
    }

    fn filter(&self, all: &Listings) -> Result<Listings> {
        Ok(all.order_by_key(|row| row.price, Direction::Desc))
    }
}
