//! Memoization table for context-free vertex digests

use crate::model::VertexId;
use std::collections::HashMap;

/// Cache of vertex digests that do not depend on any vertex above them
/// on the traversal stack
///
/// Entries are only written by the hasher, and only once a digest is
/// proven independent of its callers. The table may be shared by many
/// root calls against the same graph; it must not be reused with a
/// different graph.
#[derive(Clone, Debug)]
pub struct MemoTable<D> {
    entries: HashMap<VertexId, D>,
}

impl<D> Default for MemoTable<D> {
    fn default() -> Self {
        MemoTable {
            entries: HashMap::new(),
        }
    }
}

impl<D> MemoTable<D> {
    pub fn new() -> Self {
        MemoTable::default()
    }

    pub fn get(&self, id: VertexId) -> Option<&D> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Ids of every memoized vertex, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn insert(&mut self, id: VertexId, digest: D) {
        self.entries.insert(id, digest);
    }
}
