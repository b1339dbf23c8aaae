//! Parser and rewriter for the length-prefixed serialization grammar:
//! null/bool/int/float/string/array/object/reference tokens, each
//! self-describing its own byte length so the whole document can be sliced
//! without ever scanning for an unescaped terminator.
//!
//! The parser is strictly structural and never raises: any mismatched
//! delimiter, missing digit, out-of-range slice, unknown prefix, or
//! over-deep nesting makes [`parse`] return `None`, which the dispatcher
//! treats as "not recognized" and falls through to the next strategy.

use crate::value::{RefKind, Value};

/// Payloads nested more than this many levels deep are rejected rather than
/// risking a stack overflow walking or rebuilding the tree.
pub const MAX_DEPTH: usize = 1000;

/// Fast pre-filter: reject inputs that plainly cannot be this grammar
/// before running the full recursive-descent parser on them.
fn prefilter_ok(input: &[u8]) -> bool {
    if input.is_empty() {
        return false;
    }
    let Some(&first) = input.iter().find(|b| !b.is_ascii_whitespace()) else {
        return false;
    };
    if !matches!(
        first,
        b'a' | b'b' | b'c' | b'd' | b'i' | b'n' | b'o' | b'r' | b's' | b'O' | b'N' | b'R'
    ) {
        return false;
    }
    input.contains(&b';') || input.contains(&b'{')
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expect(&mut self, b: u8) -> Option<()> {
        if self.peek() == Some(b) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    /// One or more ASCII digits, returned as raw text (not parsed to a
    /// number) unless the caller also needs the numeric value.
    fn digits(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(&self.input[start..self.pos])
        }
    }

    fn uint(&mut self) -> Option<usize> {
        let raw = self.digits()?;
        std::str::from_utf8(raw).ok()?.parse().ok()
    }

    /// Optional leading `-` followed by one or more digits, returned as the
    /// exact raw bytes consumed (sign included).
    fn signed_digits(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.digits()?;
        Some(&self.input[start..self.pos])
    }

    fn quoted_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        self.expect(b'"')?;
        let content = crate::bytes::slice(self.input, self.pos, len)?;
        self.pos += len;
        self.expect(b'"')?;
        Some(content)
    }

    fn value(&mut self, depth: usize) -> Option<Value> {
        if depth > MAX_DEPTH {
            return None;
        }
        match self.peek()? {
            b'N' => {
                self.pos += 1;
                self.expect(b';')?;
                Some(Value::Null)
            }
            b'b' => {
                self.pos += 1;
                self.expect(b':')?;
                let b = match self.peek()? {
                    b'0' => false,
                    b'1' => true,
                    _ => return None,
                };
                self.pos += 1;
                self.expect(b';')?;
                Some(Value::Boolean(b))
            }
            b'i' => {
                self.pos += 1;
                self.expect(b':')?;
                let raw = self.signed_digits()?.to_vec();
                self.expect(b';')?;
                Some(Value::Integer(raw))
            }
            b'd' => {
                self.pos += 1;
                self.expect(b':')?;
                let semi = crate::bytes::find(self.input, self.pos, b';')?;
                if semi == self.pos {
                    return None;
                }
                let raw = &self.input[self.pos..semi];
                if !raw
                    .iter()
                    .all(|&c| c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.' | b'e' | b'E'))
                {
                    return None;
                }
                let raw = raw.to_vec();
                self.pos = semi + 1;
                Some(Value::Float(raw))
            }
            b's' => {
                self.pos += 1;
                self.expect(b':')?;
                let len = self.uint()?;
                self.expect(b':')?;
                let content = self.quoted_bytes(len)?.to_vec();
                self.expect(b';')?;
                Some(Value::ByteString(content))
            }
            b'a' => {
                self.pos += 1;
                self.expect(b':')?;
                let n = self.uint()?;
                self.expect(b':')?;
                self.expect(b'{')?;
                let pairs = self.pairs(n, depth)?;
                self.expect(b'}')?;
                Some(Value::Sequence(pairs))
            }
            b'O' => {
                self.pos += 1;
                self.expect(b':')?;
                let lc = self.uint()?;
                self.expect(b':')?;
                let class = self.quoted_bytes(lc)?.to_vec();
                self.expect(b':')?;
                let n = self.uint()?;
                self.expect(b':')?;
                self.expect(b'{')?;
                let entries = self.pairs(n, depth)?;
                self.expect(b'}')?;
                Some(Value::Object { class, entries })
            }
            b'r' | b'R' => {
                let kind = if self.peek()? == b'r' {
                    RefKind::Lower
                } else {
                    RefKind::Upper
                };
                self.pos += 1;
                self.expect(b':')?;
                let raw = self.signed_digits()?.to_vec();
                self.expect(b';')?;
                Some(Value::Reference { kind, index: raw })
            }
            // Closure serialization (`C:...`) is explicitly out of scope:
            // refuse and let the dispatcher fall through.
            b'C' => None,
            _ => None,
        }
    }

    fn pairs(&mut self, n: usize, depth: usize) -> Option<Vec<(Value, Value)>> {
        let mut pairs = Vec::with_capacity(n);
        for _ in 0..n {
            let key = self.value(depth + 1)?;
            let val = self.value(depth + 1)?;
            pairs.push((key, val));
        }
        Some(pairs)
    }
}

/// Parse `input` as a complete serialization-grammar document. Returns
/// `None` unless the parser consumes every byte — a shorter parse means
/// `input` merely starts with something that looks like this grammar, which
/// is not success: any shorter consumption means the top-level input was
/// not pure serialization and the result is discarded.
pub fn parse(input: &[u8]) -> Option<Value> {
    if !prefilter_ok(input) {
        return None;
    }
    let mut parser = Parser { input, pos: 0 };
    let value = parser.value(0)?;
    if parser.pos == input.len() {
        Some(value)
    } else {
        None
    }
}

/// Parse, rewrite every embedded string, and re-emit with recomputed
/// lengths. `None` means `input` did not parse as this grammar; the
/// dispatcher should try the next strategy.
pub fn rewrite(input: &[u8], search: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    let tree = parse(input)?;
    Some(tree.rewrite(search, replace).to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert!(parse(b"").is_none());
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert!(parse(b"X:1;").is_none());
    }

    #[test]
    fn rejects_short_top_level_consumption() {
        // Valid prefix, but trailing garbage after it.
        assert!(parse(b"N;garbage").is_none());
    }

    #[test]
    fn byte_length_is_recomputed() {
        let out = rewrite(b"s:5:\"hello\";", b"hello", b"hi").unwrap();
        assert_eq!(out, b"s:2:\"hi\";");
    }

    #[test]
    fn multibyte_strings_counted_in_bytes() {
        // "café!" is s:6 because é is two UTF-8 bytes.
        let input = "s:6:\"café!\";".as_bytes();
        let out = rewrite(input, "café".as_bytes(), b"tea").unwrap();
        assert_eq!(out, b"s:4:\"tea!\";");
    }

    #[test]
    fn nested_structure_preserves_reference() {
        let input = b"a:2:{i:0;s:3:\"foo\";i:1;r:2;}";
        let out = rewrite(input, b"foo", b"foobar").unwrap();
        assert_eq!(out, b"a:2:{i:0;s:6:\"foobar\";i:1;r:2;}");
    }

    #[test]
    fn object_class_name_is_never_substituted() {
        let input = b"O:3:\"Foo\":1:{s:3:\"bar\";s:3:\"Foo\";}";
        // search happens to match the class name too, but class names are
        // not `s:` productions and must not be rewritten.
        let out = rewrite(input, b"Foo", b"Quux").unwrap();
        assert_eq!(out, b"O:3:\"Foo\":1:{s:3:\"bar\";s:4:\"Quux\";}");
    }

    #[test]
    fn closures_are_refused() {
        assert!(parse(b"C:3:\"Foo\":0:{}").is_none());
    }

    #[test]
    fn excessive_nesting_is_rejected_not_overflowed() {
        let mut input = Vec::new();
        for _ in 0..(MAX_DEPTH + 10) {
            input.extend_from_slice(b"a:1:{i:0;");
        }
        input.extend_from_slice(b"N;");
        for _ in 0..(MAX_DEPTH + 10) {
            input.push(b'}');
        }
        assert!(parse(&input).is_none());
    }

    #[test]
    fn no_match_is_byte_identical_round_trip() {
        let input = b"a:1:{i:0;s:3:\"bar\";}";
        let out = rewrite(input, b"zzz", b"yyy").unwrap();
        assert_eq!(out, input);
    }
}
