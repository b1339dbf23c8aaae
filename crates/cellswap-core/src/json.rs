//! JSON decode/replace/encode stage.
//!
//! A payload is only treated as JSON if it decodes to a structured value —
//! an object or an array. A bare scalar (`"abc"`, `42`, `true`) is valid
//! JSON but is left for the base64 or literal-replace stage, because a
//! lone quoted string is indistinguishable from plenty of non-JSON column
//! content and re-encoding it would just add quotes nobody asked for.
//!
//! Re-encoding uses `serde_json`'s default formatting, which already does
//! not escape forward slashes and emits non-ASCII codepoints as literal
//! UTF-8 rather than `\uXXXX` escapes — exactly the option set this stage
//! is required to use, so no custom `Formatter` is needed here.

use crate::replace::replace_bytes;
use serde_json::{Map, Value as Json};

fn replace_in_string(s: &str, search: &[u8], replace: &[u8]) -> String {
    let replaced = replace_bytes(s.as_bytes(), search, replace);
    String::from_utf8(replaced).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn replace_value(value: Json, search: &[u8], replace: &[u8]) -> Json {
    match value {
        Json::String(s) => Json::String(replace_in_string(&s, search, replace)),
        Json::Array(items) => Json::Array(
            items
                .into_iter()
                .map(|v| replace_value(v, search, replace))
                .collect(),
        ),
        Json::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                let new_key = replace_in_string(&k, search, replace);
                out.insert(new_key, replace_value(v, search, replace));
            }
            Json::Object(out)
        }
        scalar => scalar,
    }
}

/// Decode `input` as JSON, replace every occurrence of `search` inside
/// strings and object keys, and re-encode. Returns `None` if `input` is not
/// valid JSON, or is valid but scalar (not an object or array).
pub fn rewrite(input: &[u8], search: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    let value: Json = serde_json::from_slice(input).ok()?;
    if !(value.is_object() || value.is_array()) {
        return None;
    }
    let replaced = replace_value(value, search, replace);
    serde_json::to_vec(&replaced).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_replacement_with_no_slash_escaping() {
        let input = br#"{"url":"http://old.example/path","keys":["old","keep"]}"#;
        let out = rewrite(input, b"old", b"new").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"url":"http://new.example/path","keys":["new","keep"]}"#
        );
    }

    #[test]
    fn bare_scalars_are_not_recognized() {
        assert!(rewrite(br#""abc""#, b"a", b"b").is_none());
        assert!(rewrite(b"42", b"4", b"5").is_none());
    }

    #[test]
    fn invalid_json_is_not_recognized() {
        assert!(rewrite(b"not json at all {", b"a", b"b").is_none());
    }

    #[test]
    fn keys_are_rewritten_too() {
        let input = br#"{"old_key":"value"}"#;
        let out = rewrite(input, b"old_key", b"new_key").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"new_key":"value"}"#);
    }

    #[test]
    fn non_ascii_is_emitted_raw_not_escaped() {
        let input = "{\"city\":\"caf\u{e9}\"}".as_bytes();
        let out = rewrite(input, b"x", b"y").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains('\u{e9}'));
        assert!(!out.contains("\\u00e9"));
    }
}
