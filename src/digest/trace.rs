//! Human-readable trace encoding
//!
//! | Event      | Encoding         |
//! |------------|------------------|
//! | vertex     | `V` + label      |
//! | back-ref   | `R` + distance   |
//! | child      | embedded digest  |
//! | terminator | `E`              |
//!
//! Every event except the first and the terminator is preceded by `/`,
//! so a leaf `a` is `VaE` and `c -> a, c -> b` is `Vc/VaE/VbEE`.

use super::{tags, Accumulator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A digest that spells out its event sequence
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceDigest(String);

impl TraceDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TraceDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for TraceDigest {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TraceDigest {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for TraceDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct TraceAccumulator {
    state: String,
    bytes: u64,
}

impl TraceAccumulator {
    /// Start a new event, separating it from any earlier one
    fn begin(&mut self, tag: u8) {
        if !self.state.is_empty() {
            self.push(char::from(tags::SEPARATOR));
        }
        self.push(char::from(tag));
    }

    fn push(&mut self, c: char) {
        self.state.push(c);
        self.bytes += c.len_utf8() as u64;
    }

    fn push_str(&mut self, s: &str) {
        self.state.push_str(s);
        self.bytes += s.len() as u64;
    }
}

impl Accumulator for TraceAccumulator {
    type Digest = TraceDigest;

    fn append_vertex(&mut self, label: &str) {
        self.begin(tags::VERTEX);
        self.push_str(label);
    }

    fn append_backref(&mut self, distance: usize) {
        self.begin(tags::BACKREF);
        self.push_str(&distance.to_string());
    }

    fn append_child(&mut self, digest: &TraceDigest) {
        if !self.state.is_empty() {
            self.push(char::from(tags::SEPARATOR));
        }
        self.push_str(digest.as_str());
    }

    fn append_terminator(&mut self) {
        self.push(char::from(tags::TERMINATOR));
    }

    fn bytes_processed(&self) -> u64 {
        self.bytes
    }

    fn finalize(self) -> TraceDigest {
        TraceDigest(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> TraceDigest {
        let mut acc = TraceAccumulator::default();
        acc.append_vertex(label);
        acc.append_terminator();
        acc.finalize()
    }

    #[test]
    fn test_leaf_encoding() {
        assert_eq!(leaf("a"), "VaE");
    }

    #[test]
    fn test_children_are_separated() {
        let mut acc = TraceAccumulator::default();
        acc.append_vertex("c");
        acc.append_child(&leaf("a"));
        acc.append_child(&leaf("b"));
        acc.append_terminator();

        assert_eq!(acc.finalize(), "Vc/VaE/VbEE");
    }

    #[test]
    fn test_lone_backref_has_no_separator() {
        let mut acc = TraceAccumulator::default();
        acc.append_backref(3);
        assert_eq!(acc.finalize().as_str(), "R3");
    }

    #[test]
    fn test_byte_count_includes_separators() {
        let mut acc = TraceAccumulator::default();
        acc.append_vertex("c");
        acc.append_child(&leaf("a"));
        acc.append_terminator();

        let bytes = acc.bytes_processed();
        let digest = acc.finalize();
        assert_eq!(bytes, digest.as_str().len() as u64);
    }

    #[test]
    fn test_child_count_is_disambiguated() {
        // A vertex with one child must not be a prefix of one with two.
        let mut one = TraceAccumulator::default();
        one.append_vertex("a");
        one.append_child(&leaf("b"));
        one.append_terminator();

        let mut two = TraceAccumulator::default();
        two.append_vertex("a");
        two.append_child(&leaf("b"));
        two.append_child(&leaf("b"));
        two.append_terminator();

        let one = one.finalize().into_string();
        let two = two.finalize().into_string();
        assert!(!two.starts_with(&one));
    }
}
