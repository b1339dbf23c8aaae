//! The decoded-value tree for the serialization grammar.
//!
//! This is a closed sum type, not a dynamic/`Any`-typed tree: every variant
//! the grammar can produce has a place here, and nothing else does. Leaf
//! productions we never rewrite (`Null`, `Boolean`, `Integer`, `Float`,
//! `Reference`) keep their exact source bytes so re-emission is byte
//! identical without needing to re-derive a textual representation that
//! might not round-trip (e.g. `-0`, leading zeros, or whatever float
//! formatting the original encoder used).
//!
//! `Sequence` and `Object` hold an *ordered* list of `(key, value)` pairs,
//! not a map, because the wire format is positional: reordering entries
//! would change the output bytes and could change whether a later pass
//! reaches the same fixed point.

/// A back-reference is written `r:<i>;` or `R:<i>;`; the two forms are
/// distinct productions in the grammar but neither is ever rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// Raw digit text of an `i:<int>;` production (including a leading `-`
    /// if present), excluding the `i:` prefix and trailing `;`.
    Integer(Vec<u8>),
    /// Raw content of a `d:<float>;` production, excluding the `d:` prefix
    /// and trailing `;`.
    Float(Vec<u8>),
    /// Raw bytes of an `s:L:"...";` production, excluding the length
    /// prefix and surrounding quotes. This is the only variant whose bytes
    /// are ever substituted.
    ByteString(Vec<u8>),
    /// `a:N:{...}` — an ordered associative sequence of `N` pairs.
    Sequence(Vec<(Value, Value)>),
    /// `O:Lc:"class":N:{...}` — a named object. `class` holds the raw class
    /// name bytes (never rewritten); `entries` holds `N` property pairs.
    Object {
        class: Vec<u8>,
        entries: Vec<(Value, Value)>,
    },
    /// `r:<i>;` / `R:<i>;` — a positional back-reference, preserved
    /// verbatim regardless of any rewriting elsewhere in the tree.
    Reference { kind: RefKind, index: Vec<u8> },
}

impl Value {
    /// Rebuild this tree with every [`Value::ByteString`] leaf substring
    /// replaced. All other productions, including back-references and
    /// object class names, are carried over unchanged.
    pub fn rewrite(&self, search: &[u8], replace: &[u8]) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Integer(raw) => Value::Integer(raw.clone()),
            Value::Float(raw) => Value::Float(raw.clone()),
            Value::ByteString(content) => {
                Value::ByteString(crate::replace::replace_bytes(content, search, replace))
            }
            Value::Sequence(pairs) => Value::Sequence(
                pairs
                    .iter()
                    .map(|(k, v)| (k.rewrite(search, replace), v.rewrite(search, replace)))
                    .collect(),
            ),
            Value::Object { class, entries } => Value::Object {
                class: class.clone(),
                entries: entries
                    .iter()
                    .map(|(k, v)| (k.rewrite(search, replace), v.rewrite(search, replace)))
                    .collect(),
            },
            Value::Reference { kind, index } => Value::Reference {
                kind: *kind,
                index: index.clone(),
            },
        }
    }

    /// Re-emit the tree as serialization-grammar bytes. Length prefixes on
    /// `ByteString` and the pair count on `Sequence`/`Object` are always
    /// recomputed from the current tree, so a rewritten tree carries
    /// accurate lengths even though other productions are copied verbatim.
    pub fn emit(&self, out: &mut Vec<u8>) {
        match self {
            Value::Null => out.extend_from_slice(b"N;"),
            Value::Boolean(b) => {
                out.extend_from_slice(if *b { b"b:1;" } else { b"b:0;" });
            }
            Value::Integer(raw) => {
                out.extend_from_slice(b"i:");
                out.extend_from_slice(raw);
                out.push(b';');
            }
            Value::Float(raw) => {
                out.extend_from_slice(b"d:");
                out.extend_from_slice(raw);
                out.push(b';');
            }
            Value::ByteString(content) => {
                out.extend_from_slice(b"s:");
                out.extend_from_slice(content.len().to_string().as_bytes());
                out.extend_from_slice(b":\"");
                out.extend_from_slice(content);
                out.extend_from_slice(b"\";");
            }
            Value::Sequence(pairs) => {
                out.extend_from_slice(b"a:");
                out.extend_from_slice(pairs.len().to_string().as_bytes());
                out.extend_from_slice(b":{");
                for (k, v) in pairs {
                    k.emit(out);
                    v.emit(out);
                }
                out.push(b'}');
            }
            Value::Object { class, entries } => {
                out.extend_from_slice(b"O:");
                out.extend_from_slice(class.len().to_string().as_bytes());
                out.extend_from_slice(b":\"");
                out.extend_from_slice(class);
                out.extend_from_slice(b"\":");
                out.extend_from_slice(entries.len().to_string().as_bytes());
                out.extend_from_slice(b":{");
                for (k, v) in entries {
                    k.emit(out);
                    v.emit(out);
                }
                out.push(b'}');
            }
            Value::Reference { kind, index } => {
                out.push(match kind {
                    RefKind::Lower => b'r',
                    RefKind::Upper => b'R',
                });
                out.push(b':');
                out.extend_from_slice(index);
                out.push(b';');
            }
        }
    }

    /// Convenience wrapper around [`Value::emit`] for tests and callers
    /// that just want the bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.emit(&mut out);
        out
    }
}
