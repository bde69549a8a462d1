//! Parser for listing fixture files.
//!
//! Format, one row per line:
//! - `id::category::price::quantity`
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::error::{RelationError, Result};
use crate::table::Table;
use crate::types::Listing;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const FIELD_COUNT: usize = 4;

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RelationError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => RelationError::IoError(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse a listings file into rows, in file order.
pub fn parse_listings(path: &Path) -> Result<Vec<Listing>> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let lines = read_lines(path)?;
    let mut listings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        listings.push(parse_listing_line(line_trimmed, &file, line_no)?);
    }

    Ok(listings)
}

/// Load a listings file straight into a `Table`.
pub fn load_listing_table(path: &Path) -> Result<Table<Listing>> {
    let listings = parse_listings(path)?;
    let parsed = listings.len();
    let table = Table::from_rows(listings);

    tracing::info!(
        "Loaded {} listings from {} ({} unique ids)",
        parsed,
        path.display(),
        table.len()
    );
    Ok(table)
}

fn parse_listing_line(line: &str, file: &str, line_no: usize) -> Result<Listing> {
    let parts: Vec<&str> = line.split("::").map(str::trim).collect();
    if parts.len() != FIELD_COUNT {
        return Err(RelationError::FieldCountMismatch {
            expected: FIELD_COUNT,
            found: parts.len(),
            line: line_no,
        });
    }

    let category = parts[1];
    if category.is_empty() {
        return Err(RelationError::InvalidValue {
            field: "category".to_string(),
            value: line.to_string(),
        });
    }

    Ok(Listing {
        id: parse_field(parts[0], "id", file, line_no)?,
        category: category.to_string(),
        price: parse_field(parts[2], "price", file, line_no)?,
        quantity: parse_field(parts[3], "quantity", file, line_no)?,
    })
}

fn parse_field<T>(value: &str, field: &str, file: &str, line_no: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| RelationError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {}", field, e),
    })
}
