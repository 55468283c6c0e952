//! Hashing session over one graph

use super::{vertex_hash, MemoTable};
use crate::digest::{Accumulator, ByteCounter, DefaultAccumulator};
use crate::model::{Graph, VertexId};
use tracing::debug;

/// Order in which [`HashSession::hash_all`] visits vertices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashOrder {
    /// Creation order
    Forward,
    /// Reverse creation order
    Reverse,
}

/// Borrows a graph and owns the memo table and byte counter shared by
/// every root call made through it
///
/// The graph is borrowed immutably for the session's lifetime, so it
/// cannot change while memoized digests are live.
pub struct HashSession<'g, A: Accumulator = DefaultAccumulator> {
    graph: &'g Graph,
    memo: MemoTable<A::Digest>,
    counter: ByteCounter,
}

impl<'g, A: Accumulator> HashSession<'g, A> {
    pub fn new(graph: &'g Graph) -> Self {
        HashSession {
            graph,
            memo: MemoTable::new(),
            counter: ByteCounter::new(),
        }
    }

    /// Digest of a single vertex
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to the session's graph.
    pub fn hash(&mut self, id: VertexId) -> A::Digest {
        vertex_hash::<A>(self.graph, id, &mut self.memo, &mut self.counter)
    }

    /// Hash every vertex, returning `(id, digest)` pairs in visiting order
    pub fn hash_all(&mut self, order: HashOrder) -> Vec<(VertexId, A::Digest)> {
        let ids: Vec<VertexId> = match order {
            HashOrder::Forward => self.graph.vertex_ids().collect(),
            HashOrder::Reverse => self.graph.vertex_ids().rev().collect(),
        };
        let digests: Vec<_> = ids.into_iter().map(|id| (id, self.hash(id))).collect();

        debug!(
            ?order,
            vertices = digests.len(),
            memoized = self.memo.len(),
            bytes = self.counter.total(),
            "hashed graph"
        );
        digests
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn memo(&self) -> &MemoTable<A::Digest> {
        &self.memo
    }

    /// Total bytes fed to accumulators by this session
    pub fn total_bytes_processed(&self) -> u64 {
        self.counter.total()
    }
}
