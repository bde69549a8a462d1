//! The user-facing filter: a configuration plus step inspection.
//!
//! A `FilterConfig` declares once which relation a filter applies to and
//! which components it runs. Any number of `Filter` instances can share
//! one config; each owns its own `Pipeline` and execution trace.

use crate::applied_filter::AppliedFilter;
use crate::error::{FilterError, Result};
use crate::filter_pipeline::Pipeline;
use crate::traits::ComponentSpec;
use relation::Queryable;
use std::sync::Arc;

/// Immutable declaration of a filter: target relation and component list.
pub struct FilterConfig<Q, P> {
    applies_to: Q,
    components: Arc<[ComponentSpec<Q, P>]>,
}

impl<Q: Queryable, P> FilterConfig<Q, P> {
    pub fn builder() -> FilterConfigBuilder<Q, P> {
        FilterConfigBuilder::default()
    }

    /// The unfiltered relation every execution starts from
    pub fn applies_to(&self) -> &Q {
        &self.applies_to
    }

    pub fn components(&self) -> &[ComponentSpec<Q, P>] {
        &self.components
    }
}

/// Builder for `FilterConfig`; each field can be set exactly once.
///
/// ## Usage
/// ```ignore
/// let config = FilterConfig::builder()
///     .applies_to(MemoryRelation::all(table))
///     .components([
///         ComponentSpec::of::<CategoryComponent>(),
///         ComponentSpec::of::<PriceDescendingComponent>(),
///     ])
///     .build()?;
/// ```
pub struct FilterConfigBuilder<Q, P> {
    applies_to: Option<Q>,
    components: Option<Vec<ComponentSpec<Q, P>>>,
    error: Option<FilterError>,
}

impl<Q: Queryable, P> FilterConfigBuilder<Q, P> {
    /// Declare the relation this filter runs against.
    pub fn applies_to(mut self, relation: Q) -> Self {
        if self.applies_to.is_some() {
            self.reject("applies_to");
        } else {
            self.applies_to = Some(relation);
        }
        self
    }

    /// Declare the components, in the order they run.
    pub fn components(mut self, specs: impl IntoIterator<Item = ComponentSpec<Q, P>>) -> Self {
        if self.components.is_some() {
            self.reject("components");
        } else {
            self.components = Some(specs.into_iter().collect());
        }
        self
    }

    /// Finish the declaration. A missing component list means zero components.
    pub fn build(self) -> Result<Arc<FilterConfig<Q, P>>> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let applies_to = self.applies_to.ok_or(FilterError::MissingTarget)?;

        Ok(Arc::new(FilterConfig {
            applies_to,
            components: self.components.unwrap_or_default().into(),
        }))
    }

    // first misuse wins
    fn reject(&mut self, field: &'static str) {
        self.error.get_or_insert(FilterError::AlreadyConfigured { field });
    }
}

impl<Q, P> Default for FilterConfigBuilder<Q, P> {
    fn default() -> Self {
        Self {
            applies_to: None,
            components: None,
            error: None,
        }
    }
}

/// A configured filter with access to its last execution.
///
/// `results` and `removed` fail with `NotExecuted` until an execution has
/// succeeded; `at_step` fails with `StepOutOfRange` for any index that has
/// no recorded step.
pub struct Filter<Q, P> {
    config: Arc<FilterConfig<Q, P>>,
    pipeline: Option<Pipeline<Q, P>>,
    results: Option<Q>,
}

impl<Q: Queryable, P> Filter<Q, P> {
    pub fn new(config: Arc<FilterConfig<Q, P>>) -> Self {
        Self {
            config,
            pipeline: None,
            results: None,
        }
    }

    /// Build a fresh filter from `config` and execute it once.
    pub fn run(config: Arc<FilterConfig<Q, P>>, params: Option<&P>) -> Result<Self> {
        let mut filter = Self::new(config);
        filter.execute(params)?;
        Ok(filter)
    }

    pub fn config(&self) -> &Arc<FilterConfig<Q, P>> {
        &self.config
    }

    /// Run the pipeline, creating it on first use.
    pub fn execute(&mut self, params: Option<&P>) -> Result<&Q> {
        self.results = None;

        let config = &self.config;
        let pipeline = self.pipeline.get_or_insert_with(|| {
            tracing::debug!(
                "Creating pipeline with {} components",
                config.components.len()
            );
            Pipeline::new(config.applies_to.clone(), Arc::clone(&config.components))
        });

        let results = pipeline.execute(params)?;
        Ok(&*self.results.insert(results))
    }

    /// Final relation of the last execution.
    ///
    /// This is the last step's results, or the target relation itself when
    /// the filter has no components.
    pub fn results(&self) -> Result<&Q> {
        self.results.as_ref().ok_or(FilterError::NotExecuted)
    }

    /// Every row of the target relation missing from `results`.
    ///
    /// Cumulative over the whole pipeline, unlike `AppliedFilter::removed`
    /// which is relative to the step's own input.
    pub fn removed(&self) -> Result<Q> {
        let results = self.results()?;
        Ok(self.config.applies_to.excluding(results))
    }

    pub fn at_step(&self, index: usize) -> Result<&AppliedFilter<Q>> {
        let steps = self.applied_filters();
        steps.get(index).ok_or(FilterError::StepOutOfRange {
            index,
            recorded: steps.len(),
        })
    }

    /// Steps of the last execution, empty before any.
    pub fn applied_filters(&self) -> &[AppliedFilter<Q>] {
        self.pipeline
            .as_ref()
            .map(|pipeline| pipeline.applied_filters())
            .unwrap_or(&[])
    }
}
