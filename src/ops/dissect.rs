//! Decode trace digests back into the graphs they describe
//!
//! A trace digest is a preorder walk: `V<label>` opens a vertex (and is
//! an edge from the vertex enclosing it), `E` closes the innermost open
//! vertex, and `R<n>` is an edge from the innermost open vertex to the
//! one `n` levels above it. Labels are runs of characters other than the
//! tags `V`, `R`, `E` and the separator `/`; labels containing those do
//! not decode unambiguously.

use crate::{Error, Result};
use std::collections::BTreeSet;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::CharIndices;

/// Labelled edges `(from, to)`, sorted for stable output
pub type EdgeSet = BTreeSet<(String, String)>;

fn is_tag(c: char) -> bool {
    matches!(c, 'V' | 'R' | 'E' | '/')
}

fn malformed(offset: usize, reason: &'static str) -> Error {
    Error::MalformedTrace { offset, reason }
}

/// Decode one trace digest, adding its edges to `edges`
///
/// Several digests of the same graph can be merged into one set.
pub fn dissect(trace: &str, edges: &mut EdgeSet) -> Result<()> {
    let mut open: Vec<String> = Vec::new();
    let mut chars = trace.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            'V' => {
                let label = take_while(&mut chars, |c| !is_tag(c));
                if label.is_empty() {
                    return Err(malformed(offset, "vertex without a label"));
                }
                if let Some(parent) = open.last() {
                    edges.insert((parent.clone(), label.clone()));
                }
                open.push(label);
            }
            'R' => {
                let digits = take_while(&mut chars, |c| c.is_ascii_digit());
                let distance: usize = digits
                    .parse()
                    .map_err(|_| malformed(offset, "back-reference without a distance"))?;
                let from = open
                    .last()
                    .ok_or_else(|| malformed(offset, "back-reference outside a vertex"))?;
                let to = distance
                    .checked_add(1)
                    .and_then(|levels| open.len().checked_sub(levels))
                    .map(|i| &open[i])
                    .ok_or_else(|| malformed(offset, "back-reference beyond the open path"))?;
                edges.insert((from.clone(), to.clone()));
            }
            'E' => {
                open.pop()
                    .ok_or_else(|| malformed(offset, "terminator without an open vertex"))?;
            }
            '/' => {
                if open.is_empty() {
                    return Err(malformed(offset, "separator outside a vertex"));
                }
            }
            _ => return Err(malformed(offset, "unknown tag")),
        }
    }

    if !open.is_empty() {
        return Err(malformed(trace.len(), "unterminated vertex"));
    }
    Ok(())
}

fn take_while(chars: &mut Peekable<CharIndices<'_>>, pred: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !pred(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

/// Render edges as a GraphViz digraph, appending `suffix` to every name
pub fn to_dot(edges: &EdgeSet, suffix: &str) -> String {
    let mut out = String::from("digraph G {\n");
    for (from, to) in edges {
        // Writing to a String cannot fail
        let _ = writeln!(out, "    {from}{suffix} -> {to}{suffix};");
    }
    out.push_str("}\n");
    out
}
