//! Single-pass dispatcher: try serialization, then JSON, then base64,
//! then fall back to a literal byte-wise substring replace.
//!
//! Each strategy is a total function that either produces a rewritten
//! payload or signals "not recognized"; none of them can raise. That keeps
//! the chain itself total, which is what lets the multi-pass driver call
//! it in a loop without any error-handling of its own.

use crate::{base64env, json, replace::replace_bytes, serialfmt};

/// Run one pass of the dispatcher over `payload`.
pub fn one_pass(payload: &[u8], search: &[u8], replace: &[u8]) -> Vec<u8> {
    if search.is_empty() {
        return payload.to_vec();
    }
    if let Some(out) = serialfmt::rewrite(payload, search, replace) {
        return out;
    }
    if let Some(out) = json::rewrite(payload, search, replace) {
        return out;
    }
    if let Some(out) = base64env::rewrite(payload, search, replace) {
        return out;
    }
    replace_bytes(payload, search, replace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_through_to_literal_on_unrecognized_payload() {
        assert_eq!(one_pass(b"hello world", b"world", b"there"), b"hello there");
    }

    #[test]
    fn prefers_serialization_over_literal() {
        let out = one_pass(b"s:5:\"hello\";", b"hello", b"hi");
        assert_eq!(out, b"s:2:\"hi\";");
    }

    #[test]
    fn prefers_json_over_base64_and_literal() {
        let out = one_pass(br#"{"a":"old"}"#, b"old", b"new");
        assert_eq!(out, br#"{"a":"new"}"#);
    }

    #[test]
    fn closure_payload_falls_through_to_literal() {
        // `C:` is refused by the serialization parser; this input is not
        // valid JSON and not base64-shaped either, so it must reach the
        // literal fallback unchanged apart from the substring replace.
        let out = one_pass(b"C:3:\"Foo\":old", b"old", b"new");
        assert_eq!(out, b"C:3:\"Foo\":new");
    }
}
