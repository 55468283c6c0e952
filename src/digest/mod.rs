//! Digest accumulators
//!
//! An accumulator is an append-only sink for the four events the
//! structural hasher emits per vertex. Two backends share the same event
//! stream:
//!
//! - [`TraceAccumulator`]: a readable, exact text encoding
//! - [`Fnv1aAccumulator`]: the same tagged bytes folded into 64 bits
//!
//! The backend is picked at compile time. [`DefaultAccumulator`] follows
//! the `compact-digest` cargo feature.

mod compact;
mod trace;

pub use compact::{CompactDigest, Fnv1aAccumulator};
pub use trace::{TraceAccumulator, TraceDigest};

use std::fmt;
use std::hash::Hash;

/// Event tags shared by both backends
pub(crate) mod tags {
    pub const VERTEX: u8 = b'V';
    pub const BACKREF: u8 = b'R';
    pub const CHILD: u8 = b'D';
    pub const TERMINATOR: u8 = b'E';
    /// Separator the trace encoding places before every event but the first
    pub const SEPARATOR: u8 = b'/';
}

/// Append-only event sink that finalizes into a digest
pub trait Accumulator: Default {
    /// The finalized, comparable digest
    type Digest: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Tag the vertex being encoded and its label
    fn append_vertex(&mut self, label: &str);

    /// Record a cycle closing `distance` levels above the current vertex
    /// (0 = the vertex itself)
    fn append_backref(&mut self, distance: usize);

    /// Embed the digest of an out-edge target
    fn append_child(&mut self, digest: &Self::Digest);

    /// Mark the end of the vertex's children
    fn append_terminator(&mut self);

    /// Bytes fed into this accumulator so far
    fn bytes_processed(&self) -> u64;

    /// Consume the accumulator and produce its digest
    fn finalize(self) -> Self::Digest;
}

#[cfg(not(feature = "compact-digest"))]
pub type DefaultAccumulator = TraceAccumulator;

#[cfg(feature = "compact-digest")]
pub type DefaultAccumulator = Fnv1aAccumulator;

/// Running total of bytes processed by finalized accumulators
///
/// Owned by whoever drives the hashing (usually a `HashSession`) and
/// passed down by reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteCounter {
    total: u64,
}

impl ByteCounter {
    pub fn new() -> Self {
        ByteCounter::default()
    }

    /// Finalize `acc`, adding its byte count to the total
    pub fn seal<A: Accumulator>(&mut self, acc: A) -> A::Digest {
        self.total += acc.bytes_processed();
        acc.finalize()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}
