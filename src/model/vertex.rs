//! Vertex type - a labelled node with ordered out-edges

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a vertex within its [`Graph`](super::Graph)
///
/// Identity is positional, not label-based: two vertices with the same
/// label remain distinct. Ids are only minted by `Graph::add_vertex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(usize);

impl VertexId {
    pub(crate) fn new(index: usize) -> Self {
        VertexId(index)
    }

    /// Position of this vertex in creation order
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex in the graph
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    /// Free-form label, hashed as part of the vertex
    pub(crate) label: String,

    /// Out-edge targets in insertion order. May repeat and may include
    /// the vertex itself.
    pub(crate) out_edges: Vec<VertexId>,
}

impl Vertex {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Vertex {
            label: label.into(),
            out_edges: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn out_edges(&self) -> &[VertexId] {
        &self.out_edges
    }

    /// Check whether this vertex has no out-edges
    pub fn is_leaf(&self) -> bool {
        self.out_edges.is_empty()
    }
}
