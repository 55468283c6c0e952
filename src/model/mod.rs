//! Graph model types for memhash

mod graph;
mod vertex;

pub use graph::{Graph, GraphDescription, VertexDescription};
pub use vertex::{Vertex, VertexId};
