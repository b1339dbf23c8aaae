//! The literal, byte-wise substring replacement primitive.
//!
//! Every higher-level stage bottoms out here: the fallback strategy applies
//! it directly to the whole payload, the base64 stage applies it to the
//! decoded (but otherwise opaque) bytes, and the JSON and serialization
//! rewriters apply it to each string leaf while rebuilding their trees.

/// Replace every non-overlapping occurrence of `search` in `haystack` with
/// `replace`, scanning left to right. An empty `search` is a no-op: the
/// input is returned unchanged, matching the "identity on empty search"
/// invariant required of the whole rewriter.
pub fn replace_bytes(haystack: &[u8], search: &[u8], replace: &[u8]) -> Vec<u8> {
    if search.is_empty() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut pos = 0;
    while pos < haystack.len() {
        if haystack[pos..].starts_with(search) {
            out.extend_from_slice(replace);
            pos += search.len();
        } else {
            out.push(haystack[pos]);
            pos += 1;
        }
    }
    out
}
