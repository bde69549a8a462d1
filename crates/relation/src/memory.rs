//! In-memory implementation of `Queryable`.
//!
//! A `MemoryRelation` is a list of predicates and orderings over a shared
//! `Table`. Nothing is evaluated until the relation is counted or
//! enumerated, so building and merging relations is cheap.

use crate::error::{RelationError, Result};
use crate::query::Queryable;
use crate::table::Table;
use crate::types::{Direction, Record, RecordId};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;
type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Lazily evaluated subset of a `Table`.
///
/// ## Evaluation
/// 1. Scan the table in id order, keeping rows that satisfy every predicate
/// 2. If any orderings exist, stable-sort by them in declaration order
///
/// Rows that compare equal under every ordering keep their id order.
pub struct MemoryRelation<R> {
    table: Arc<Table<R>>,
    predicates: Vec<Predicate<R>>,
    orderings: Vec<Comparator<R>>,
}

impl<R: Record> MemoryRelation<R> {
    /// Every row of the table, unordered beyond id order.
    pub fn all(table: Arc<Table<R>>) -> Self {
        Self {
            table,
            predicates: Vec::new(),
            orderings: Vec::new(),
        }
    }

    /// The table this relation describes a subset of
    pub fn table(&self) -> &Arc<Table<R>> {
        &self.table
    }

    /// Narrow the relation to rows matching `predicate`.
    pub fn filter_by<F>(&self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.predicates.push(Arc::new(predicate));
        next
    }

    /// Add an ordering. Earlier orderings take precedence.
    pub fn order_by<F>(&self, comparator: F) -> Self
    where
        F: Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.orderings.push(Arc::new(comparator));
        next
    }

    /// Add an ordering on a derived key.
    pub fn order_by_key<K, F>(&self, key: F, direction: Direction) -> Self
    where
        K: Ord,
        F: Fn(&R) -> K + Send + Sync + 'static,
    {
        self.order_by(move |a, b| match direction {
            Direction::Asc => key(a).cmp(&key(b)),
            Direction::Desc => key(b).cmp(&key(a)),
        })
    }

    /// Drop rows whose id is in `ids`.
    pub fn exclude_ids(&self, ids: impl IntoIterator<Item = RecordId>) -> Self {
        let excluded: HashSet<RecordId> = ids.into_iter().collect();
        self.filter_by(move |row| !excluded.contains(&row.id()))
    }

    fn matches(&self, row: &R) -> bool {
        self.predicates.iter().all(|predicate| predicate(row))
    }

    /// Evaluate into borrowed rows, in enumeration order.
    fn evaluate(&self) -> Vec<&R> {
        let mut rows: Vec<&R> = self
            .table
            .rows()
            .par_iter()
            .filter(|row| self.matches(row))
            .collect();

        if !self.orderings.is_empty() {
            rows.sort_by(|a, b| {
                self.orderings
                    .iter()
                    .map(|cmp| cmp(*a, *b))
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        tracing::trace!(
            "Evaluated relation: {} of {} rows match",
            rows.len(),
            self.table.len()
        );
        rows
    }
}

impl<R: Record> Queryable for MemoryRelation<R> {
    type Item = R;

    fn merge(&self, other: &Self) -> Result<Self> {
        if !Arc::ptr_eq(&self.table, &other.table) {
            return Err(RelationError::TableMismatch);
        }

        let mut merged = self.clone();
        merged.predicates.extend(other.predicates.iter().cloned());
        merged.orderings.extend(other.orderings.iter().cloned());
        Ok(merged)
    }

    fn excluding(&self, other: &Self) -> Self {
        self.exclude_ids(other.ids())
    }

    fn ids(&self) -> Vec<RecordId> {
        self.evaluate().into_iter().map(|row| row.id()).collect()
    }

    fn to_vec(&self) -> Vec<R> {
        self.evaluate().into_iter().cloned().collect()
    }

    fn count(&self) -> usize {
        self.table
            .rows()
            .par_iter()
            .filter(|row| self.matches(row))
            .count()
    }

    fn is_empty(&self) -> bool {
        !self.table.rows().par_iter().any(|row| self.matches(row))
    }
}

impl<R> Clone for MemoryRelation<R> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            predicates: self.predicates.clone(),
            orderings: self.orderings.clone(),
        }
    }
}

impl<R> fmt::Debug for MemoryRelation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRelation")
            .field("predicates", &self.predicates.len())
            .field("orderings", &self.orderings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Listing;

    fn create_test_table() -> Arc<Table<Listing>> {
        Arc::new(Table::from_rows(vec![
            Listing::new(1, "test", 100, 3),
            Listing::new(2, "test", 500, 7),
            Listing::new(3, "spec", 500, 9),
            Listing::new(4, "spec", 100, 1),
        ]))
    }

    #[test]
    fn test_all_enumerates_in_id_order() {
        let all = MemoryRelation::all(create_test_table());

        assert_eq!(all.ids(), vec![1, 2, 3, 4]);
        assert_eq!(all.count(), 4);
        assert!(!all.is_empty());
    }

    #[test]
    fn test_filter_by_narrows() {
        let all = MemoryRelation::all(create_test_table());
        let tests = all.filter_by(|row| row.category == "test");

        assert_eq!(tests.ids(), vec![1, 2]);
        // the source relation is untouched
        assert_eq!(all.count(), 4);
    }

    #[test]
    fn test_order_by_key_is_stable() {
        let all = MemoryRelation::all(create_test_table());
        let by_price = all.order_by_key(|row| row.price, Direction::Desc);

        // 2 and 3 tie on price, as do 1 and 4; ties keep id order
        assert_eq!(by_price.ids(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_merge_intersects_and_orders() {
        let all = MemoryRelation::all(create_test_table());
        let tests = all.filter_by(|row| row.category == "test");
        let ordered = all.order_by_key(|row| row.price, Direction::Desc);

        let merged = tests.merge(&ordered).unwrap();
        assert_eq!(merged.ids(), vec![2, 1]);
    }

    #[test]
    fn test_merge_orderings_compose() {
        let all = MemoryRelation::all(create_test_table());
        let by_price = all.order_by_key(|row| row.price, Direction::Asc);
        let by_quantity = all.order_by_key(|row| row.quantity, Direction::Desc);

        let merged = by_price.merge(&by_quantity).unwrap();
        assert_eq!(merged.ids(), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_merge_rejects_other_table() {
        let left = MemoryRelation::all(create_test_table());
        let right = MemoryRelation::all(create_test_table());

        let result = left.merge(&right);
        assert!(matches!(result, Err(RelationError::TableMismatch)));
    }

    #[test]
    fn test_excluding_uses_identity() {
        let all = MemoryRelation::all(create_test_table());
        let expensive = all
            .filter_by(|row| row.price > 200)
            .order_by_key(|row| row.quantity, Direction::Desc);

        let rest = all.excluding(&expensive);
        assert_eq!(rest.ids(), vec![1, 4]);
    }

    #[test]
    fn test_empty_relation() {
        let all = MemoryRelation::all(create_test_table());
        let none = all.filter_by(|row| row.category == "nonexistent");

        assert!(none.is_empty());
        assert_eq!(none.count(), 0);
        assert!(none.to_vec().is_empty());
    }
}
