//! The table/row walker around [`cellswap_core`]: discovers tables and
//! columns, streams rows, rewrites text-like cells, and emits parameterized
//! `UPDATE`s within a row-identifying `WHERE` clause.

pub mod config;
pub mod error;
pub mod plan;
pub mod report;
pub mod schema;
pub mod walker;

pub use config::{Config, TableFilter};
pub use error::{ConfigError, WalkError};
pub use report::{Report, TableReport};
pub use walker::walk;
