//! Structural hashing over a graph

mod hasher;
mod memo;
mod session;

pub use hasher::vertex_hash;
pub use memo::MemoTable;
pub use session::{HashOrder, HashSession};
