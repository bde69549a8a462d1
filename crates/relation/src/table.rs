//! In-memory table storage.
//!
//! A `Table` owns its rows and keeps them sorted by id, which is the
//! default enumeration order of every relation built over it.

use crate::types::{Record, RecordId};

/// Rows of one record type, sorted ascending by id.
///
/// Tables are built once (usually from a fixture file) and then shared
/// read-only behind an `Arc` by all relations that describe subsets of it.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: Record> Table<R> {
    /// Creates a new, empty Table
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a table from arbitrary rows; later rows replace earlier ones
    /// with the same id.
    pub fn from_rows(rows: impl IntoIterator<Item = R>) -> Self {
        let mut rows: Vec<R> = rows.into_iter().collect();
        rows.sort_by_key(|row| row.id());

        // stable sort keeps input order among equal ids; keep the last one
        rows.reverse();
        rows.dedup_by_key(|row| row.id());
        rows.reverse();

        Self { rows }
    }

    /// Insert a row, replacing any existing row with the same id
    pub fn insert(&mut self, row: R) {
        match self.position(row.id()) {
            Ok(idx) => self.rows[idx] = row,
            Err(idx) => self.rows.insert(idx, row),
        }
    }

    /// Get a row by id
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.position(id).ok().map(|idx| &self.rows[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in id order
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter()
    }

    fn position(&self, id: RecordId) -> std::result::Result<usize, usize> {
        self.rows.binary_search_by_key(&id, |row| row.id())
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}
