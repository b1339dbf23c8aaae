//! Base64 envelope sniffing and rewriting.
//!
//! The classifier is deliberately loose — length a multiple of 4 and
//! alphabet-only is enough to *try* decoding, which means plenty of plain
//! English words of length 4, 8, ... will pass the sniff. That is
//! intentional: the downstream decode still has to succeed under strict
//! mode, and if this stage does not fire at all, the dispatcher falls
//! through to literal replacement anyway, so a false positive at this
//! stage is harmless rather than corrupting.
//!
//! Decoding never descends into the result: the bytes produced are treated
//! as opaque and substituted with a flat, literal replacement. Nested
//! envelopes (base64 of serialization, base64 of JSON) are only peeled by
//! re-running the whole dispatcher on the next pass of the fixed-point
//! driver — and even then, only if the outer layer is re-decoded from
//! scratch, since this stage does not recurse (see the documented
//! limitation discussed in DESIGN.md).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::replace::replace_bytes;

/// True when `input` could plausibly be standard base64: non-empty, a
/// multiple of 4 bytes long, and drawn entirely from `A-Za-z0-9+/=`.
pub fn looks_like_base64(input: &[u8]) -> bool {
    if input.is_empty() || input.len() % 4 != 0 {
        return false;
    }
    input
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}

/// Decode `input` (strict RFC 4648 standard alphabet), literally replace
/// `search` with `replace` in the decoded bytes, and re-encode canonically.
/// Returns `None` if `input` does not look like base64, fails to decode
/// under strict rules, or decodes to an empty result.
pub fn rewrite(input: &[u8], search: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    if !looks_like_base64(input) {
        return None;
    }
    let decoded = STANDARD.decode(input).ok()?;
    if decoded.is_empty() {
        return None;
    }
    let replaced = replace_bytes(&decoded, search, replace);
    Some(STANDARD.encode(replaced).into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plausible_base64() {
        assert!(looks_like_base64(b"aGVsbG8="));
        assert!(!looks_like_base64(b""));
        assert!(!looks_like_base64(b"abc")); // not a multiple of 4
        assert!(!looks_like_base64(b"abc!")); // invalid alphabet byte
    }

    #[test]
    fn single_pass_replace_round_trips() {
        let input = STANDARD.encode(b"find me here");
        let out = rewrite(input.as_bytes(), b"me", b"you").unwrap();
        assert_eq!(out, STANDARD.encode(b"find you here").into_bytes());
    }

    #[test]
    fn non_base64_is_not_recognized() {
        assert!(rewrite(b"not base64 at all!!", b"a", b"b").is_none());
    }

    #[test]
    fn strict_decoding_rejects_invalid_bytes_despite_alphabet_match() {
        // Passes the sniff (len % 4 == 0, alphabet-only) but "====" decodes
        // to nothing useful under strict padding rules.
        assert!(rewrite(b"====", b"a", b"b").is_none());
    }
}
