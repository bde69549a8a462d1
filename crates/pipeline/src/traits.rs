//! Core traits for the filtering pipeline.
//!
//! This module defines the Component trait that every filtering step
//! implements, and `ComponentSpec`, the entry a filter configuration
//! lists to say "build one of these per execution".

use crate::error::{FilterError, Result};
use relation::Queryable;
use std::fmt;

/// One filtering (or ordering) unit applied during a pipeline step.
///
/// ## Design Note
/// - A component is built fresh for every execution from the caller's
///   parameter object (see `FromParams`), so it carries no state between runs
/// - `filter` returns a sub-query derived from `all`, the unfiltered base
///   relation; the pipeline intersects it with the current relation
/// - The default `filter` reports `NotImplemented`, which surfaces when the
///   pipeline reaches the component, not when it is registered
pub trait Component<Q>: Send + Sync {
    /// Returns the name of this component (for logging and step inspection)
    fn name(&self) -> &str;

    /// Build the sub-query this component contributes.
    ///
    /// # Arguments
    /// * `all` - Every element of the target collection
    ///
    /// # Returns
    /// * `Ok(Q)` - A relation restricting or ordering the collection
    /// * `Err` - If the component cannot produce one
    fn filter(&self, all: &Q) -> Result<Q> {
        let _ = all;
        Err(FilterError::NotImplemented {
            component: self.name().to_string(),
        })
    }
}

/// Construct a component from the (optional) filter-parameter object.
///
/// Components must treat `None` explicitly, usually by falling back to an
/// unconditional relation.
pub trait FromParams<P>: Sized {
    fn from_params(params: Option<&P>) -> Self;
}

/// A registered component type in a filter configuration.
///
/// ## Usage
/// ```ignore
/// let specs = vec![
///     ComponentSpec::of::<CategoryComponent>(),
///     ComponentSpec::of::<PriceDescendingComponent>(),
/// ];
/// ```
pub struct ComponentSpec<Q, P> {
    type_name: &'static str,
    build: fn(Option<&P>) -> Box<dyn Component<Q>>,
}

impl<Q: Queryable, P> ComponentSpec<Q, P> {
    /// Register component type `C`.
    pub fn of<C>() -> Self
    where
        C: Component<Q> + FromParams<P> + 'static,
    {
        Self {
            type_name: std::any::type_name::<C>(),
            build: build_boxed::<Q, P, C>,
        }
    }

    /// Fully qualified Rust type name of the registered component
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Build a new component instance for one execution.
    pub fn instantiate(&self, params: Option<&P>) -> Box<dyn Component<Q>> {
        (self.build)(params)
    }
}

fn build_boxed<Q, P, C>(params: Option<&P>) -> Box<dyn Component<Q>>
where
    Q: Queryable,
    C: Component<Q> + FromParams<P> + 'static,
{
    Box::new(C::from_params(params))
}

impl<Q, P> Clone for ComponentSpec<Q, P> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            build: self.build,
        }
    }
}

impl<Q, P> fmt::Debug for ComponentSpec<Q, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSpec")
            .field("type_name", &self.type_name)
            .finish()
    }
}
