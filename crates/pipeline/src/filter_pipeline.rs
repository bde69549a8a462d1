//! The Pipeline runs components in order and records every step.
//!
//! Each step's input is the previous step's output, so execution is
//! strictly sequential: a component narrows (or reorders) what the
//! components before it left behind.

use crate::applied_filter::AppliedFilter;
use crate::error::Result;
use crate::traits::ComponentSpec;
use relation::Queryable;
use std::sync::Arc;
use tracing;

/// Executes an ordered list of components against a base relation.
///
/// ## Usage
/// ```ignore
/// let mut pipeline: Pipeline<_, ListingQuery> = Pipeline::new(
///     MemoryRelation::all(table),
///     vec![
///         ComponentSpec::of::<CategoryComponent>(),
///         ComponentSpec::of::<PriceDescendingComponent>(),
///     ],
/// );
///
/// let results = pipeline.execute(Some(&query))?;
/// for step in pipeline.applied_filters() {
///     println!("{} removed {:?}", step.component().name(), step.removed().ids());
/// }
/// ```
pub struct Pipeline<Q, P> {
    base: Q,
    components: Arc<[ComponentSpec<Q, P>]>,
    applied_filters: Vec<AppliedFilter<Q>>,
}

impl<Q: Queryable, P> Pipeline<Q, P> {
    /// Create a pipeline over `base` with a fixed component list.
    pub fn new(base: Q, components: impl Into<Arc<[ComponentSpec<Q, P>]>>) -> Self {
        Self {
            base,
            components: components.into(),
            applied_filters: Vec::new(),
        }
    }

    /// The unfiltered relation every execution starts from
    pub fn base(&self) -> &Q {
        &self.base
    }

    pub fn components(&self) -> &[ComponentSpec<Q, P>] {
        &self.components
    }

    /// Steps recorded by the most recent execution (empty before any).
    pub fn applied_filters(&self) -> &[AppliedFilter<Q>] {
        &self.applied_filters
    }

    /// Run every component in declaration order.
    ///
    /// ## Algorithm
    /// 1. Clear the previous execution's steps
    /// 2. Start from the base relation
    /// 3. For each component spec in order:
    ///    a. Build the component from `params`
    ///    b. Intersect the current relation with its sub-query and record the step
    ///    c. Stop if nothing is left; later components are never built
    /// 4. Return the last relation
    ///
    /// # Returns
    /// * `Ok(Q)` - The final relation (the base itself with no components)
    /// * `Err` - If a component fails; steps before it stay recorded
    pub fn execute(&mut self, params: Option<&P>) -> Result<Q> {
        self.applied_filters.clear();

        let mut relation = self.base.clone();
        let mut remaining = relation.count();

        for spec in self.components.iter() {
            let component = spec.instantiate(params);
            tracing::debug!(
                "Applying component: {} (input count: {})",
                component.name(),
                remaining
            );

            let step = AppliedFilter::apply(relation, &self.base, component)?;
            relation = step.relation_after().clone();
            remaining = relation.count();

            tracing::debug!(
                "Component applied: {} (output count: {})",
                step.component().name(),
                remaining
            );
            self.applied_filters.push(step);

            if remaining == 0 {
                tracing::debug!(
                    "Relation empty after step {} of {}, skipping the rest",
                    self.applied_filters.len(),
                    self.components.len()
                );
                break;
            }
        }

        Ok(relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::traits::{Component, FromParams};
    use relation::{Direction, Listing, MemoryRelation, Table};

    type Listings = MemoryRelation<Listing>;

    struct CheapOnly;

    impl FromParams<i64> for CheapOnly {
        fn from_params(_params: Option<&i64>) -> Self {
            CheapOnly
        }
    }

    impl Component<Listings> for CheapOnly {
        fn name(&self) -> &str {
            "CheapOnly"
        }

        fn filter(&self, all: &Listings) -> Result<Listings> {
            Ok(all.filter_by(|row| row.price < 200))
        }
    }

    struct AtLeast(i64);

    impl FromParams<i64> for AtLeast {
        fn from_params(params: Option<&i64>) -> Self {
            AtLeast(params.copied().unwrap_or(i64::MIN))
        }
    }

    impl Component<Listings> for AtLeast {
        fn name(&self) -> &str {
            "AtLeast"
        }

        fn filter(&self, all: &Listings) -> Result<Listings> {
            let min = self.0;
            Ok(all.filter_by(move |row| row.quantity >= min))
        }
    }

    struct ByQuantity;

    impl FromParams<i64> for ByQuantity {
        fn from_params(_params: Option<&i64>) -> Self {
            ByQuantity
        }
    }

    impl Component<Listings> for ByQuantity {
        fn name(&self) -> &str {
            "ByQuantity"
        }

        fn filter(&self, all: &Listings) -> Result<Listings> {
            Ok(all.order_by_key(|row| row.quantity, Direction::Asc))
        }
    }

    struct Unfinished;

    impl FromParams<i64> for Unfinished {
        fn from_params(_params: Option<&i64>) -> Self {
            Unfinished
        }
    }

    impl Component<Listings> for Unfinished {
        fn name(&self) -> &str {
            "Unfinished"
        }
    }

    fn base() -> Listings {
        MemoryRelation::all(Arc::new(Table::from_rows(vec![
            Listing::new(1, "test", 100, 3),
            Listing::new(2, "test", 500, 7),
            Listing::new(3, "spec", 500, 9),
            Listing::new(4, "spec", 100, 1),
        ])))
    }

    #[test]
    fn test_empty_pipeline() {
        let mut pipeline: Pipeline<Listings, i64> = Pipeline::new(base(), vec![]);

        let results = pipeline.execute(None).unwrap();
        assert_eq!(results.ids(), vec![1, 2, 3, 4]);
        assert!(pipeline.applied_filters().is_empty());
    }

    #[test]
    fn test_single_component() {
        let mut pipeline: Pipeline<Listings, i64> =
            Pipeline::new(base(), vec![ComponentSpec::of::<CheapOnly>()]);

        let results = pipeline.execute(None).unwrap();
        assert_eq!(results.ids(), vec![1, 4]);
        assert_eq!(pipeline.applied_filters().len(), 1);
        assert_eq!(pipeline.applied_filters()[0].removed().ids(), vec![2, 3]);
    }

    #[test]
    fn test_steps_are_sequential() {
        let mut pipeline: Pipeline<Listings, i64> = Pipeline::new(
            base(),
            vec![
                ComponentSpec::of::<CheapOnly>(),
                ComponentSpec::of::<ByQuantity>(),
                ComponentSpec::of::<AtLeast>(),
            ],
        );

        let results = pipeline.execute(Some(&2)).unwrap();
        assert_eq!(results.ids(), vec![1]);

        let steps = pipeline.applied_filters();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].relation_before().ids(), vec![1, 4]);
        assert_eq!(steps[1].results().ids(), vec![4, 1]);
        // reordering removes nothing
        assert!(steps[1].removed().is_empty());
        assert_eq!(steps[2].removed().ids(), vec![4]);
    }

    #[test]
    fn test_short_circuit_on_empty() {
        let mut pipeline: Pipeline<Listings, i64> = Pipeline::new(
            base(),
            vec![
                ComponentSpec::of::<AtLeast>(),
                ComponentSpec::of::<Unfinished>(),
            ],
        );

        // nothing has 100 units, so Unfinished is never reached
        let results = pipeline.execute(Some(&100)).unwrap();
        assert!(results.is_empty());
        assert_eq!(pipeline.applied_filters().len(), 1);
    }

    #[test]
    fn test_not_implemented_records_no_step() {
        let mut pipeline: Pipeline<Listings, i64> = Pipeline::new(
            base(),
            vec![
                ComponentSpec::of::<CheapOnly>(),
                ComponentSpec::of::<Unfinished>(),
            ],
        );

        let result = pipeline.execute(None);
        match result {
            Err(FilterError::NotImplemented { component }) => assert_eq!(component, "Unfinished"),
            other => panic!("expected NotImplemented, got {:?}", other),
        }
        assert_eq!(pipeline.applied_filters().len(), 1);
        assert_eq!(pipeline.applied_filters()[0].component().name(), "CheapOnly");
    }

    #[test]
    fn test_execute_resets_history() {
        let mut pipeline: Pipeline<Listings, i64> = Pipeline::new(
            base(),
            vec![
                ComponentSpec::of::<AtLeast>(),
                ComponentSpec::of::<ByQuantity>(),
            ],
        );

        pipeline.execute(Some(&100)).unwrap();
        assert_eq!(pipeline.applied_filters().len(), 1);

        let results = pipeline.execute(Some(&5)).unwrap();
        assert_eq!(results.ids(), vec![2, 3]);
        assert_eq!(pipeline.applied_filters().len(), 2);
    }
}
