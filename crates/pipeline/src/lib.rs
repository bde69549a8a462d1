//! Step-traced filter pipelines over queryable collections.
//!
//! This crate provides:
//! - Component trait and the `ComponentSpec` registry entry
//! - Pipeline for running components in order and recording each step
//! - AppliedFilter, the per-step record (results and removed rows)
//! - FilterConfig and Filter, the declaration and the inspection façade
//! - A few ready-made components for listing tables
//!
//! ## Architecture
//! A filter run threads one relation through its components:
//! 1. Each component is built from the caller's parameter object
//! 2. Its sub-query is intersected with the current relation and recorded
//! 3. Execution stops early as soon as nothing is left
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{ComponentSpec, Filter, FilterConfig};
//! use pipeline::components::*;
//!
//! let config = FilterConfig::builder()
//!     .applies_to(MemoryRelation::all(table))
//!     .components([
//!         ComponentSpec::of::<CategoryComponent>(),
//!         ComponentSpec::of::<PriceDescendingComponent>(),
//!     ])
//!     .build()?;
//!
//! let query = ListingQuery::new().with_category("books");
//! let filter = Filter::run(config, Some(&query))?;
//!
//! println!("kept {:?}", filter.results()?.ids());
//! println!("dropped {:?}", filter.removed()?.ids());
//! println!("first step dropped {:?}", filter.at_step(0)?.removed().ids());
//! ```

pub mod applied_filter;
pub mod components;
pub mod error;
pub mod filter;
pub mod filter_pipeline;
pub mod traits;

// Re-export main types
pub use applied_filter::AppliedFilter;
pub use error::{FilterError, Result};
pub use filter::{Filter, FilterConfig, FilterConfigBuilder};
pub use filter_pipeline::Pipeline;
pub use traits::{Component, ComponentSpec, FromParams};
