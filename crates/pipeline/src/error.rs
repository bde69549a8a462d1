//! Error types for the pipeline crate.
//!
//! Every variant signals a programming or configuration mistake, not a
//! transient condition, so nothing here is retried.

use relation::RelationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// A component was used without overriding `Component::filter`
    #[error("Component {component} does not implement filter")]
    NotImplemented { component: String },

    /// Results were requested before any successful execution
    #[error("Filter has not been executed")]
    NotExecuted,

    /// No step was recorded at this position
    #[error("No step at index {index} ({recorded} steps recorded)")]
    StepOutOfRange { index: usize, recorded: usize },

    /// `FilterConfig::build` was called without `applies_to`
    #[error("Filter configuration has no target relation")]
    MissingTarget,

    /// A write-once configuration field was set twice
    #[error("Filter configuration field `{field}` is already set")]
    AlreadyConfigured { field: &'static str },

    /// The underlying query engine rejected an operation
    #[error("Query error: {0}")]
    Query(#[from] RelationError),
}

pub type Result<T> = std::result::Result<T, FilterError>;
