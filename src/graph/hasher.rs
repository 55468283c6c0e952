//! Cycle-aware memoized structural hashing
//!
//! The digest of a vertex covers its label and, recursively, the digests
//! of its out-edge targets in edge order. An edge that closes a cycle to
//! a vertex still on the traversal stack is encoded as a back-reference
//! holding the *relative* distance to that vertex, so a cycle hashes the
//! same way whichever member is reached first.
//!
//! A result is memoized only when no back-reference produced below it
//! points at the vertex itself or anything above it. Such a digest is a
//! pure function of the reachable subgraph and can be reused from any
//! later call.
//!
//! The depth-first walk runs on an explicit work stack so that long
//! acyclic chains do not exhaust the native stack.

use super::MemoTable;
use crate::digest::{Accumulator, ByteCounter};
use crate::model::{Graph, VertexId};
use std::collections::HashMap;
use tracing::trace;

/// Loop point of a subtree with no unresolved back-reference
const NO_LOOP: usize = usize::MAX;

/// Vertex id -> depth, for vertices on the current traversal stack only
type ActivePath = HashMap<VertexId, usize>;

/// Compute the digest of `root` and everything reachable from it.
///
/// `memo` may be fresh or carried over from earlier calls on the same
/// graph. Bytes fed to accumulators are added to `counter`.
///
/// # Panics
///
/// Panics if `root` does not belong to `graph`.
pub fn vertex_hash<A: Accumulator>(
    graph: &Graph,
    root: VertexId,
    memo: &mut MemoTable<A::Digest>,
    counter: &mut ByteCounter,
) -> A::Digest {
    assert!(
        graph.contains(root),
        "vertex {root} does not belong to this graph"
    );

    let mut active = ActivePath::new();
    let mut stack = match enter::<A>(graph, root, memo, &mut active, counter) {
        Entry::Resolved { digest, .. } => return digest,
        Entry::Descend(frame) => vec![frame],
    };

    while let Some(mut frame) = stack.pop() {
        if let Some(&target) = graph.out_edges(frame.vertex).get(frame.cursor) {
            frame.cursor += 1;
            match enter::<A>(graph, target, memo, &mut active, counter) {
                Entry::Resolved { loop_point, digest } => {
                    frame.absorb(target, loop_point, &digest);
                    stack.push(frame);
                }
                Entry::Descend(child) => {
                    stack.push(frame);
                    stack.push(child);
                }
            }
            continue;
        }

        let vertex = frame.vertex;
        let (loop_point, digest) = frame.finish(memo, &mut active, counter);
        match stack.last_mut() {
            Some(parent) => parent.absorb(vertex, loop_point, &digest),
            None => return digest,
        }
    }

    unreachable!("work stack drained before the root vertex finished")
}

/// Outcome of reaching a vertex along an edge
enum Entry<A: Accumulator> {
    /// Answered without descending: a memo hit or a back-reference
    Resolved { loop_point: usize, digest: A::Digest },
    /// First visit on this path; its edges still need walking
    Descend(Frame<A>),
}

/// One in-progress vertex on the work stack
struct Frame<A: Accumulator> {
    vertex: VertexId,
    depth: usize,
    /// Index of the next out-edge to follow
    cursor: usize,
    acc: A,
    /// Shallowest stack position any back-reference below here points to
    loop_point: usize,
}

impl<A: Accumulator> Frame<A> {
    fn absorb(&mut self, target: VertexId, loop_point: usize, digest: &A::Digest) {
        self.acc.append_child(digest);
        // A direct self-edge is resolved at this vertex, not above it.
        if target != self.vertex {
            self.loop_point = self.loop_point.min(loop_point);
        }
    }

    fn finish(
        mut self,
        memo: &mut MemoTable<A::Digest>,
        active: &mut ActivePath,
        counter: &mut ByteCounter,
    ) -> (usize, A::Digest) {
        self.acc.append_terminator();
        let digest = counter.seal(self.acc);
        active.remove(&self.vertex);

        if self.loop_point > self.depth {
            trace!(vertex = %self.vertex, depth = self.depth, "recording digest");
            memo.insert(self.vertex, digest.clone());
        }
        (self.loop_point, digest)
    }
}

fn enter<A: Accumulator>(
    graph: &Graph,
    vertex: VertexId,
    memo: &MemoTable<A::Digest>,
    active: &mut ActivePath,
    counter: &mut ByteCounter,
) -> Entry<A> {
    let depth = active.len();
    trace!(vertex = %vertex, label = graph.label(vertex), depth, "computing digest");

    // A memoized digest was proven loop-free, so report no loop above
    // this depth.
    if let Some(digest) = memo.get(vertex) {
        trace!(vertex = %vertex, "memo hit");
        return Entry::Resolved {
            loop_point: depth,
            digest: digest.clone(),
        };
    }

    if let Some(&position) = active.get(&vertex) {
        debug_assert!(position < depth);
        let mut acc = A::default();
        acc.append_backref(depth - position - 1);
        trace!(vertex = %vertex, position, "back-reference");
        return Entry::Resolved {
            loop_point: position,
            digest: counter.seal(acc),
        };
    }

    active.insert(vertex, depth);
    let mut acc = A::default();
    acc.append_vertex(graph.label(vertex));
    Entry::Descend(Frame {
        vertex,
        depth,
        cursor: 0,
        acc,
        loop_point: NO_LOOP,
    })
}
