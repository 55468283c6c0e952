//! Append-only graph table and its JSON description format

use super::{Vertex, VertexId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A directed graph stored as an append-only vertex table
///
/// Edges are vertex ids rather than references, so cyclic shapes need no
/// shared ownership. Vertices and edges can be added but never removed,
/// which keeps every `VertexId` valid for the lifetime of the graph.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Add a vertex with no out-edges
    pub fn add_vertex(&mut self, label: impl Into<String>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(label));
        id
    }

    /// Append an edge `from -> to`
    ///
    /// Duplicate edges and self-edges are kept as-is.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        if !self.contains(to) {
            return Err(Error::UnknownVertex(to));
        }
        self.vertices
            .get_mut(from.index())
            .ok_or(Error::UnknownVertex(from))?
            .out_edges
            .push(to);
        Ok(())
    }

    /// Append several edges from one vertex, in order
    pub fn add_edges(
        &mut self,
        from: VertexId,
        targets: impl IntoIterator<Item = VertexId>,
    ) -> Result<()> {
        for to in targets {
            self.add_edge(from, to)?;
        }
        Ok(())
    }

    /// Check if the id belongs to this graph
    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// Get a vertex by id
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Label of a vertex.
    ///
    /// Panics if `id` was not minted by this graph.
    pub fn label(&self, id: VertexId) -> &str {
        &self.vertices[id.index()].label
    }

    /// Ordered out-edges of a vertex.
    ///
    /// Panics if `id` was not minted by this graph.
    pub fn out_edges(&self, id: VertexId) -> &[VertexId] {
        &self.vertices[id.index()].out_edges
    }

    /// All vertex ids in creation order
    pub fn vertex_ids(&self) -> impl DoubleEndedIterator<Item = VertexId> + ExactSizeIterator {
        (0..self.vertices.len()).map(VertexId::new)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Build a graph from a description, validating every edge index
    pub fn from_description(description: &GraphDescription) -> Result<Self> {
        let mut graph = Graph::new();
        for vertex in &description.vertices {
            graph.add_vertex(vertex.label.clone());
        }
        for (index, vertex) in description.vertices.iter().enumerate() {
            let from = VertexId::new(index);
            graph.add_edges(from, vertex.edges.iter().copied().map(VertexId::new))?;
        }
        Ok(graph)
    }

    /// Describe this graph in the serializable form
    pub fn to_description(&self) -> GraphDescription {
        GraphDescription {
            vertices: self
                .vertices
                .iter()
                .map(|v| VertexDescription {
                    label: v.label.clone(),
                    edges: v.out_edges.iter().map(VertexId::index).collect(),
                })
                .collect(),
        }
    }

    /// Parse a JSON graph description
    pub fn from_json(json: &str) -> Result<Self> {
        let description: GraphDescription = serde_json::from_str(json)?;
        Self::from_description(&description)
    }

    /// Load a JSON graph description from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Serializable graph description
///
/// ```json
/// {"vertices": [{"label": "a", "edges": [1]}, {"label": "b", "edges": [0]}]}
/// ```
///
/// Edges are zero-based indices into `vertices`, in edge order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub vertices: Vec<VertexDescription>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexDescription {
    pub label: String,
    #[serde(default)]
    pub edges: Vec<usize>,
}
