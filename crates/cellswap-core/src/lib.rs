//! Content-aware search-and-replace over encoded database payloads.
//!
//! A payload is an uninterpreted byte slice read from one table cell.
//! [`rewrite`] decodes it as a length-prefixed serialization tree,
//! as JSON, or as a base64 envelope (in that order), rewrites any embedded
//! occurrence of `search` with `replace`, and re-encodes it with corrected
//! length prefixes. If none of those formats is recognized, the result is a
//! plain byte-wise substring replacement.
//!
//! The crate is pure: no I/O, no global state, no async. It never panics on
//! malformed input — every internal parse/decode failure collapses to a
//! "not recognized" signal that falls through to the next strategy.

pub mod base64env;
pub mod bytes;
pub mod dispatch;
pub mod json;
pub mod replace;
pub mod rewrite;
pub mod serialfmt;
pub mod value;

pub use rewrite::{rewrite, rewrite_with_passes, DEFAULT_MAX_PASSES};
pub use value::Value;
