//! The structured outcome of a run, returned rather than printed as it
//! accumulates.
//!
//! The walker never prints; it only ever appends to a `Report`. Rendering
//! that report to the terminal is the CLI boundary's job.

use crate::error::WalkError;

#[derive(Debug, Default)]
pub struct TableReport {
    pub name: String,
    pub columns_examined: Vec<String>,
    pub rows_examined: u64,
    pub rows_updated: u64,
    pub skipped: bool,
}

#[derive(Debug, Default)]
pub struct Report {
    pub tables: Vec<TableReport>,
    pub errors: Vec<WalkError>,
}

impl Report {
    pub fn total_rows_examined(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_examined).sum()
    }

    pub fn total_rows_updated(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_updated).sum()
    }

    pub fn had_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
