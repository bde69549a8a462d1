//! Component keeping listings of one category.

use super::{ListingQuery, Listings};
use crate::error::Result;
use crate::traits::{Component, FromParams};

/// Keeps listings whose category equals `ListingQuery::category`.
///
/// Without a category every listing passes.
pub struct CategoryComponent {
    category: Option<String>,
}

impl FromParams<ListingQuery> for CategoryComponent {
    fn from_params(params: Option<&ListingQuery>) -> Self {
        Self {
            category: params.and_then(|query| query.category.clone()),
        }
    }
}

impl Component<Listings> for CategoryComponent {
    fn name(&self) -> &str {
        "CategoryComponent"
    }

    fn filter(&self, all: &Listings) -> Result<Listings> {
        match &self.category {
            Some(category) => {
                let category = category.clone();
                Ok(all.filter_by(move |row| row.category == category))
            }
            None => Ok(all.clone()),
        }
    }
}
