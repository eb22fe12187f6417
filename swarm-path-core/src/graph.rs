//! Square undirected weighted graph with dense adjacency storage.
//!
//! Vertices live on an `L x L` grid and are addressed by row-major index
//! in `0..L*L`. The adjacency matrix stores one small weight per ordered
//! vertex pair; the reserved maximum value marks a missing edge, so a
//! minimizing search never prefers it.

use std::fmt::Write as _;

use rand::Rng;

use crate::{Error, Result};

/// Vertex index into the flattened `L x L` grid
pub type VertexIndex = usize;

/// Edge weight. Small on purpose: the optimization sums these into `u64`.
pub type EdgeWeight = u8;

/// Sentinel weight meaning "no edge between these vertices"
pub const NO_EDGE: EdgeWeight = EdgeWeight::MAX;

/// Immutable square graph over `side * side` vertices.
///
/// Shared read-only by every worker; construction happens once before any
/// swarm starts.
#[derive(Debug, Clone)]
pub struct Graph {
    side: usize,
    /// `vertex_count * vertex_count` weights, row-major by destination
    weights: Vec<EdgeWeight>,
}

impl Graph {
    /// Build a graph from an explicit adjacency matrix.
    ///
    /// `weights` must hold `(side * side)^2` entries. Symmetry is the
    /// caller's responsibility; the generators in this module guarantee it.
    pub fn new(side: usize, weights: Vec<EdgeWeight>) -> Result<Self> {
        if side == 0 {
            return Err(Error::ZeroSideLength);
        }
        let n = side * side;
        if weights.len() != n * n {
            return Err(Error::AdjacencyMatrixSize {
                expected: n * n,
                got: weights.len(),
            });
        }
        Ok(Self { side, weights })
    }

    /// Build a graph from an undirected edge list; every other pair gets
    /// the no-edge sentinel.
    pub fn from_edges(side: usize, edges: &[(VertexIndex, VertexIndex, EdgeWeight)]) -> Result<Self> {
        if side == 0 {
            return Err(Error::ZeroSideLength);
        }
        let n = side * side;
        let mut weights = vec![NO_EDGE; n * n];
        for &(a, b, w) in edges {
            for &v in &[a, b] {
                if v >= n {
                    return Err(Error::VertexOutOfBounds {
                        vertex: v,
                        vertex_count: n,
                    });
                }
            }
            weights[n * b + a] = w;
            weights[n * a + b] = w;
        }
        Ok(Self { side, weights })
    }

    /// Side length of the vertex grid
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of vertices (`side * side`)
    pub fn vertex_count(&self) -> usize {
        self.side * self.side
    }

    /// Weight of the edge between two vertices, or [`NO_EDGE`]
    #[inline]
    pub fn edge_weight(&self, from: VertexIndex, to: VertexIndex) -> EdgeWeight {
        self.weights[self.vertex_count() * to + from]
    }

    /// Whether an edge exists between two vertices
    #[inline]
    pub fn has_edge(&self, from: VertexIndex, to: VertexIndex) -> bool {
        self.edge_weight(from, to) != NO_EDGE
    }

    /// Generate a random graph with the Waxman model.
    ///
    /// Vertices are grid points; the probability that two vertices are
    /// adjacent decays exponentially with their Euclidean distance:
    /// `p = alpha * exp(-d / (beta * d_max))`. Existing edges get a weight
    /// drawn uniformly from `[weight_min, weight_max]`.
    pub fn waxman<R: Rng>(
        rng: &mut R,
        side: usize,
        alpha: f64,
        beta: f64,
        weight_min: EdgeWeight,
        weight_max: EdgeWeight,
    ) -> Result<Self> {
        if side == 0 {
            return Err(Error::ZeroSideLength);
        }
        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return Err(Error::WaxmanShape { alpha, beta });
        }
        if weight_min == 0 || weight_min >= weight_max || weight_max >= NO_EDGE {
            return Err(Error::EdgeWeightBounds {
                min: weight_min,
                max: weight_max,
            });
        }

        let n = side * side;
        let mut weights = vec![NO_EDGE; n * n];
        let distance_max = (2.0 * n as f64).sqrt();

        for y1 in 0..side {
            for x1 in 0..side {
                let v1 = side * y1 + x1;
                // No self loops on the diagonal.
                weights[n * v1 + v1] = NO_EDGE;

                for y2 in 0..side {
                    for x2 in 0..side {
                        // Visit each unordered pair once.
                        if y2 > y1 || (y2 == y1 && x2 >= x1) {
                            continue;
                        }
                        let v2 = side * y2 + x2;

                        let dx = x2 as f64 - x1 as f64;
                        let dy = y2 as f64 - y1 as f64;
                        let distance = (dx * dx + dy * dy).sqrt();

                        let adjacency_probability =
                            alpha * (-distance / (beta * distance_max)).exp();

                        let mut weight = NO_EDGE;
                        if adjacency_probability >= rng.gen::<f64>() {
                            let span = (weight_max - weight_min) as f64;
                            weight = weight_min + (rng.gen::<f64>() * span) as EdgeWeight;
                        }

                        weights[n * v2 + v1] = weight;
                        weights[n * v1 + v2] = weight;
                    }
                }
            }
        }

        Ok(Self { side, weights })
    }

    /// Render the graph in GraphViz `fdp` syntax (grid positions pinned).
    pub fn graphviz(&self) -> String {
        let mut out = String::new();
        out.push_str("graph {\n");
        for y in 0..self.side {
            for x in 0..self.side {
                let _ = writeln!(out, "x{x}y{y} [");
                let _ = writeln!(out, "\tlabel = \"({x}:{y})\"");
                let _ = writeln!(out, "\tpos = \"{x},{y}!\"");
                out.push_str("]\n");
            }
        }
        for y1 in 0..self.side {
            for x1 in 0..self.side {
                for y2 in 0..self.side {
                    for x2 in 0..self.side {
                        if y2 > y1 || (y2 == y1 && x2 >= x1) {
                            continue;
                        }
                        let v1 = self.side * y1 + x1;
                        let v2 = self.side * y2 + x2;
                        let weight = self.edge_weight(v1, v2);
                        if weight == NO_EDGE {
                            continue;
                        }
                        let _ = writeln!(
                            out,
                            "\tx{x1}y{y1} -- x{x2}y{y2} [ label = \"{weight}\" ];"
                        );
                    }
                }
            }
        }
        out.push_str("}\n");
        out
    }

    /// Render the adjacency matrix as a text table, one row per vertex.
    pub fn dump_matrix(&self) -> String {
        let n = self.vertex_count();
        let mut out = String::new();
        for from in 0..n {
            for to in 0..n {
                let weight = self.edge_weight(from, to);
                if weight == NO_EDGE {
                    let _ = write!(out, "{:>5}", "-");
                } else {
                    let _ = write!(out, "{:>5}", weight);
                }
            }
            out.push('\n');
        }
        out
    }
}
