//! # memhash
//!
//! Structural fingerprints for the vertices of directed graphs that may
//! contain cycles.
//!
//! The digest of a vertex depends only on the shape of the subgraph
//! reachable from it (labels plus edge order), never on which vertex was
//! hashed first or on the order a caller walks the graph.
//!
//! ## Core Concepts
//!
//! - **Graph**: an append-only table of labelled vertices with ordered,
//!   possibly duplicated, possibly self-referencing out-edges
//! - **Accumulator**: an event sink that finalizes into a digest; the
//!   readable trace encoding or a compact FNV-1a fingerprint
//! - **Back-reference**: a cycle-closing edge, encoded as the relative
//!   distance to a vertex still on the traversal stack
//! - **Memo table**: digests proven independent of their callers, shared
//!   across root calls
//!
//! ## Example
//!
//! ```
//! use memhash::{Graph, HashSession, TraceAccumulator};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_vertex("a");
//! let b = graph.add_vertex("b");
//! graph.add_edge(a, b)?;
//! graph.add_edge(b, a)?;
//!
//! let mut session: HashSession<TraceAccumulator> = HashSession::new(&graph);
//! assert_eq!(session.hash(a), "Va/Vb/R1EE");
//! # Ok::<(), memhash::Error>(())
//! ```

pub mod digest;
pub mod graph;
pub mod model;
pub mod ops;

mod error;

pub use digest::{
    Accumulator, ByteCounter, CompactDigest, DefaultAccumulator, Fnv1aAccumulator,
    TraceAccumulator, TraceDigest,
};
pub use error::{Error, Result};
pub use graph::{vertex_hash, HashOrder, HashSession, MemoTable};
pub use model::{Graph, GraphDescription, Vertex, VertexDescription, VertexId};

/// Digest type produced by [`DefaultAccumulator`]
pub type Digest = <DefaultAccumulator as Accumulator>::Digest;
