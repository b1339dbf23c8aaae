//! Error kinds for configuration and the walk itself.
//!
//! Per-table metadata failures and per-row update failures are *not*
//! fatal: the walker records them on the [`crate::report::Report`] and
//! keeps going. Only connection/enumeration failures (the variants here
//! that a caller must check for before starting a walk) stop the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("max-passes must be at least 1")]
    InvalidMaxPasses,
    #[error("--only-table and --skip-table are mutually exclusive")]
    ConflictingTableFilters,
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to connect or enumerate tables: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("table `{table}`: failed to read metadata: {source}")]
    TableMetadata {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("table `{table}` row: update failed: {source}")]
    RowUpdate {
        table: String,
        #[source]
        source: sqlx::Error,
    },
}
