//! Component enforcing a stock threshold.

use super::{ListingQuery, Listings};
use crate::error::Result;
use crate::traits::{Component, FromParams};

/// Keeps listings with strictly more than `ListingQuery::min_quantity` units.
pub struct MinQuantityComponent {
    min_quantity: Option<i64>,
}

impl FromParams<ListingQuery> for MinQuantityComponent {
    fn from_params(params: Option<&ListingQuery>) -> Self {
        Self {
            min_quantity: params.and_then(|query| query.min_quantity),
        }
    }
}

impl Component<Listings> for MinQuantityComponent {
    fn name(&self) -> &str {
        "MinQuantityComponent"
    }

    fn filter(&self, all: &Listings) -> Result<Listings> {
        let Some(min_quantity) = self.min_quantity else {
            return Ok(all.clone());
        };
        Ok(all.filter_by(move |row| row.quantity > min_quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relation::{Listing, MemoryRelation, Queryable, Table};
    use std::sync::Arc;

    #[test]
    fn test_min_quantity_is_exclusive() {
        let all = MemoryRelation::all(Arc::new(Table::from_rows(vec![
            Listing::new(1, "test", 100, 3),
            Listing::new(2, "test", 500, 5),
            Listing::new(3, "spec", 500, 9),
        ])));

        let query = ListingQuery::new().with_min_quantity(5);
        let component = MinQuantityComponent::from_params(Some(&query));

        let filtered = component.filter(&all).unwrap();
        assert_eq!(filtered.ids(), vec![3]);
    }
}
