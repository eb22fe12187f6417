//! Priority-to-path decoding and decoded path snapshots.
//!
//! A particle encodes a candidate solution as one real-valued priority per
//! vertex. Decoding walks greedily from the start vertex: at every step it
//! moves to the unvisited neighbor minimizing `priority * edge_weight`.
//! The walk never backtracks, so it can miss paths that exist; the swarm
//! compensates with many independent priority vectors.

use crate::graph::{Graph, VertexIndex, NO_EDGE};
use crate::task::Task;

/// Decode a priority vector into a vertex sequence.
///
/// Returns `None` when the greedy walk strands before reaching the task's
/// end vertex. Deterministic: ties on `priority * weight` go to the lowest
/// vertex index.
pub fn decode(task: &Task<'_>, priorities: &[f64]) -> Option<Vec<VertexIndex>> {
    let graph = task.graph();
    let vertex_count = graph.vertex_count();

    // Visited set, so the walk never forms a cycle.
    let mut visited = vec![false; vertex_count];
    let mut vertices = Vec::new();

    let mut current = task.start();
    loop {
        vertices.push(current);

        if current == task.end() {
            return Some(vertices);
        }

        visited[current] = true;

        let mut best: Option<(VertexIndex, f64)> = None;
        for next in 0..vertex_count {
            if visited[next] {
                continue;
            }
            let edge_weight = graph.edge_weight(current, next);
            if edge_weight == NO_EDGE {
                continue;
            }
            let score = priorities[next] * f64::from(edge_weight);
            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((next, score)),
            }
        }

        // Nowhere left to go.
        current = best?.0;
    }
}

/// Literal weight of a vertex sequence: the sum of traversed edges.
///
/// A path of zero or one vertices weighs nothing.
pub fn path_weight(graph: &Graph, vertices: &[VertexIndex]) -> u64 {
    vertices
        .windows(2)
        .map(|pair| u64::from(graph.edge_weight(pair[0], pair[1])))
        .sum()
}

/// Snapshot of a complete decoded path.
///
/// Besides the vertex sequence and its weight this keeps the priority
/// vector that produced it, so other particles and peer processes can be
/// re-seeded with the encoding rather than just the decoded result. All
/// fields are computed eagerly at construction; a snapshot is only
/// meaningful against the graph it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    priorities: Vec<f64>,
    vertices: Vec<VertexIndex>,
    weight: u64,
}

impl GraphPath {
    /// Decode `priorities` against `task`; `None` when the walk strands.
    pub fn from_priorities(task: &Task<'_>, priorities: &[f64]) -> Option<Self> {
        let vertices = decode(task, priorities)?;
        let weight = path_weight(task.graph(), &vertices);
        Some(Self {
            priorities: priorities.to_vec(),
            vertices,
            weight,
        })
    }

    /// The priority vector this path was decoded from
    pub fn priorities(&self) -> &[f64] {
        &self.priorities
    }

    /// The decoded vertex sequence, start to end
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    /// Total path weight
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Strictly-better comparison; equal weights do not count.
    pub fn is_better_than(&self, other: &GraphPath) -> bool {
        self.weight < other.weight
    }

    /// Human-readable dump: `(10): 0 -5-> 1 -5-> 3`
    pub fn dump(&self, graph: &Graph) -> String {
        use std::fmt::Write as _;
        let mut out = format!("({}): ", self.weight);
        for pair in self.vertices.windows(2) {
            let _ = write!(
                out,
                "{} -{}-> ",
                pair[0],
                graph.edge_weight(pair[0], pair[1])
            );
        }
        if let Some(last) = self.vertices.last() {
            let _ = write!(out, "{}", last);
        }
        out
    }
}
