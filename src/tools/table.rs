//! Read-only CSV snapshot access for the lookup tools.
//!
//! Each tool call loads its backing table fresh from disk; there is no cache
//! and no write path. Empty cells are treated as nulls. Row order is the file
//! order, which is what makes first-match lookups deterministic per snapshot.

use std::path::Path;

use crate::constants::HINT_SAMPLE_SIZE;
use crate::error::{ToolError, ToolErrorKind};

/// An in-memory snapshot of one CSV table.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A borrowed view of one row, resolving cells by column name.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl Table {
    /// Loads a table from `dir/filename`.
    ///
    /// Any I/O or CSV parse failure maps to
    /// [`ToolErrorKind::SourceUnavailable`] so the caller can surface it as a
    /// tool-level failure rather than a crash.
    pub fn load(dir: &Path, filename: &str) -> Result<Self, ToolError> {
        let path = dir.join(filename);
        if !path.exists() {
            return Err(ToolError::new(
                ToolErrorKind::SourceUnavailable,
                format!("{} not found or could not be loaded", filename),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| {
                ToolError::new(
                    ToolErrorKind::SourceUnavailable,
                    format!("{} could not be read: {}", filename, e),
                )
            })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                ToolError::new(
                    ToolErrorKind::SourceUnavailable,
                    format!("{} has an unreadable header row: {}", filename, e),
                )
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                ToolError::new(
                    ToolErrorKind::SourceUnavailable,
                    format!("{} contains a malformed row: {}", filename, e),
                )
            })?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Index of a column by exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether the table has a column with this header.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Fails with [`ToolErrorKind::MissingColumn`] unless every required
    /// column is present.
    pub fn require_columns(&self, filename: &str, required: &[&str]) -> Result<(), ToolError> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|c| !self.has_column(c))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::new(
                ToolErrorKind::MissingColumn,
                format!(
                    "missing required columns in {}: {}",
                    filename,
                    missing.join(", ")
                ),
            ))
        }
    }

    /// Iterates rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }

    /// First row whose cell in `column` equals `key` after trimming.
    ///
    /// Duplicate keys are a data-quality defect; first match wins.
    pub fn find_first(&self, column: &str, key: &str) -> Option<Row<'_>> {
        self.rows()
            .find(|row| row.get(column).map(str::trim) == Some(key))
    }

    /// Up to [`HINT_SAMPLE_SIZE`] non-null values from `column`, in row order.
    /// Used for `NotFound` hints; never a complete key listing.
    pub fn sample_keys(&self, column: &str) -> Vec<String> {
        self.rows()
            .filter_map(|row| row.get(column))
            .map(|v| v.trim().to_string())
            .take(HINT_SAMPLE_SIZE)
            .collect()
    }
}

impl<'a> Row<'a> {
    /// Cell value by column name; `None` when the column is absent or the
    /// cell is empty (null).
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column(column)?;
        let cell = self.table.rows[self.index].get(idx)?.as_str();
        if cell.trim().is_empty() {
            None
        } else {
            Some(cell)
        }
    }

    /// Cell parsed as a number, with null (or unparseable) treated as 0.
    pub fn number_or_zero(&self, column: &str) -> f64 {
        self.get(column)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

/// Formats a day count without a trailing `.0` for whole numbers.
pub fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}", days as i64)
    } else {
        format!("{}", days)
    }
}
