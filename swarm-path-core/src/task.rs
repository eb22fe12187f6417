//! Optimization task: a graph plus the endpoints of the wanted path.

use crate::graph::{Graph, VertexIndex};
use crate::{Error, Result};

/// One search task over a borrowed graph.
///
/// The graph reference is read-only and shared by every worker; a task is
/// a couple of words and is freely copied into each swarm group.
#[derive(Debug, Clone, Copy)]
pub struct Task<'g> {
    graph: &'g Graph,
    start: VertexIndex,
    end: VertexIndex,
}

impl<'g> Task<'g> {
    /// Create a task, rejecting endpoints outside the graph.
    pub fn new(graph: &'g Graph, start: VertexIndex, end: VertexIndex) -> Result<Self> {
        let vertex_count = graph.vertex_count();
        for &vertex in &[start, end] {
            if vertex >= vertex_count {
                return Err(Error::VertexOutOfBounds {
                    vertex,
                    vertex_count,
                });
            }
        }
        Ok(Self { graph, start, end })
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn start(&self) -> VertexIndex {
        self.start
    }

    pub fn end(&self) -> VertexIndex {
        self.end
    }
}
