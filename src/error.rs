//! Error types for memhash

use crate::model::VertexId;
use thiserror::Error;

/// Result type alias for memhash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in memhash operations
///
/// Hashing itself never fails. These cover building graphs from
/// untrusted descriptions and decoding trace digests.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown vertex: {0}")]
    UnknownVertex(VertexId),

    #[error("Malformed trace digest at offset {offset}: {reason}")]
    MalformedTrace { offset: usize, reason: &'static str },
}
