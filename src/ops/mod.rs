//! Tooling over finished digests

mod dissect;

pub use dissect::{dissect, to_dot, EdgeSet};
