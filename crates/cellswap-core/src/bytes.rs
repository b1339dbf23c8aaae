//! Byte-oriented measurement and slicing.
//!
//! Every length prefix in the serialization grammar (`s:L:"...";`, the class
//! name in `O:Lc:"...";`) counts *bytes*, never codepoints. A column holding
//! multi-byte UTF-8 text (e.g. `café`) has a byte length that differs from
//! its character count, so all slicing here operates on `&[u8]`.

/// Number of bytes in `s`. Distinct from `s.chars().count()`.
pub fn byte_len(s: &[u8]) -> usize {
    s.len()
}

/// Slice `len` bytes starting at `start`, or `None` if that range falls
/// outside `s`. Never panics on out-of-range input.
pub fn slice(s: &[u8], start: usize, len: usize) -> Option<&[u8]> {
    let end = start.checked_add(len)?;
    s.get(start..end)
}

/// Byte offset of the first occurrence of `needle` in `haystack` at or after
/// `from`, or `None` if it does not occur.
pub fn find(haystack: &[u8], from: usize, needle: u8) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.iter().position(|&b| b == needle))
        .map(|rel| rel + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_counts_bytes_not_chars() {
        // "café" is 4 chars but 5 bytes (é is 2 bytes in UTF-8).
        assert_eq!(byte_len("café".as_bytes()), 5);
        assert_eq!("café".chars().count(), 4);
    }

    #[test]
    fn slice_rejects_out_of_range() {
        let s = b"hello";
        assert_eq!(slice(s, 1, 3), Some(&s[1..4]));
        assert_eq!(slice(s, 3, 10), None);
        assert_eq!(slice(s, 10, 0), None);
    }

    #[test]
    fn find_locates_byte() {
        assert_eq!(find(b"a:1:{", 0, b';'), None);
        assert_eq!(find(b"d:1.5;", 2, b';'), Some(5));
    }
}
