//! # Relation Crate
//!
//! The queryable collection layer that filter pipelines run against.
//!
//! ## Main Components
//!
//! - **query**: the `Queryable` capability contract (merge, exclude by id,
//!   count, enumerate)
//! - **types**: identity (`RecordId`, `Record`), `Direction`, and the
//!   sample `Listing` row
//! - **table**: `Table`, rows of one type kept in id order
//! - **memory**: `MemoryRelation`, a lazy `Queryable` over a shared table
//! - **parser**: load `Listing` fixtures from `::`-separated files
//! - **error**: error types for loading and composing
//!
//! ## Example Usage
//!
//! ```ignore
//! use relation::{Direction, MemoryRelation, Queryable, parser};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let table = Arc::new(parser::load_listing_table(Path::new("data/listings.dat"))?);
//! let all = MemoryRelation::all(table);
//!
//! let cheap = all.filter_by(|row| row.price < 200);
//! let ordered = all.order_by_key(|row| row.quantity, Direction::Desc);
//! let both = cheap.merge(&ordered)?;
//!
//! println!("{} cheap listings, rest: {:?}", both.count(), all.excluding(&both).ids());
//! ```

pub mod error;
pub mod memory;
pub mod parser;
pub mod query;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{RelationError, Result};
pub use memory::MemoryRelation;
pub use query::Queryable;
pub use table::Table;
pub use types::{Direction, Listing, Record, RecordId};
