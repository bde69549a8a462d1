//! Error types for the relation crate.
//!
//! Covers both halves of the crate:
//! - loading fixture rows from `::`-separated files
//! - composing relations (merging queries that belong to different tables)

use thiserror::Error;

/// Errors that can occur while loading rows or composing relations
#[derive(Error, Debug)]
pub enum RelationError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a fixture file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field had a value of the wrong shape
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Two relations over different tables were combined.
    ///
    /// Intersection and exclusion are only defined between descriptions of
    /// the same underlying collection.
    #[error("Cannot combine relations over different tables")]
    TableMismatch,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RelationError>;
