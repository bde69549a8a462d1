//! The record of one pipeline step.

use crate::error::Result;
use crate::traits::Component;
use relation::Queryable;
use std::fmt;

/// How the relation looked before and after one component was applied.
///
/// Immutable once recorded. `relation_after` is the intersection of
/// `relation_before` with the component's sub-query, so it never contains
/// a row `relation_before` lacks.
pub struct AppliedFilter<Q> {
    component: Box<dyn Component<Q>>,
    relation_before: Q,
    relation_after: Q,
}

impl<Q: Queryable> AppliedFilter<Q> {
    /// Apply `component` to `relation_before`.
    ///
    /// # Arguments
    /// * `relation_before` - The relation produced by the previous step
    /// * `all` - The unfiltered base relation the component derives its sub-query from
    /// * `component` - A freshly built component instance
    pub(crate) fn apply(
        relation_before: Q,
        all: &Q,
        component: Box<dyn Component<Q>>,
    ) -> Result<Self> {
        let sub_query = component.filter(all)?;
        let relation_after = relation_before.merge(&sub_query)?;

        Ok(Self {
            component,
            relation_before,
            relation_after,
        })
    }

    pub fn component(&self) -> &dyn Component<Q> {
        self.component.as_ref()
    }

    pub fn relation_before(&self) -> &Q {
        &self.relation_before
    }

    pub fn relation_after(&self) -> &Q {
        &self.relation_after
    }

    /// What this step matched; alias of `relation_after`.
    pub fn results(&self) -> &Q {
        &self.relation_after
    }

    /// Rows this step dropped, relative to the step's own input.
    ///
    /// Computed on each call by id membership, so a component that only
    /// reorders removes nothing.
    pub fn removed(&self) -> Q {
        self.relation_before.excluding(&self.relation_after)
    }
}

impl<Q> fmt::Debug for AppliedFilter<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppliedFilter")
            .field("component", &self.component.name())
            .finish()
    }
}
