//! # swarm-path core
//!
//! Particle Swarm Optimization over weighted graphs with priority-based
//! path decoding.
//!
//! This crate provides:
//! - [`graph::Graph`]: a square, undirected, dense-adjacency graph
//! - [`path`]: the greedy priority-to-path decoder and path snapshots
//! - [`particle::Particle`]: the constricted-PSO update rule
//! - [`group::SwarmGroup`]: one single-threaded swarm with stagnation reset
//!   and best-effort gossip integration
//! - [`runner::SwarmRunner`]: fan-out of a particle budget across worker
//!   threads and final aggregation
//!
//! Randomness is always explicit: every component that draws takes a
//! seedable RNG handle, nothing reads a global generator.

pub mod graph;
pub mod group;
pub mod particle;
pub mod path;
pub mod runner;
pub mod task;
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::graph::{Graph, EdgeWeight, VertexIndex, NO_EDGE};
    pub use crate::group::{HistoryEntry, SwarmConfig, SwarmGroup};
    pub use crate::path::GraphPath;
    pub use crate::runner::{RunOutcome, RunnerConfig, SwarmRunner};
    pub use crate::task::Task;
    pub use crate::traits::{Gossip, NoGossip};
}

/// Result type for swarm-path operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for swarm-path core operations.
///
/// Every variant is a configuration error: invalid construction parameters
/// are rejected before any iteration runs. Decode failures and lost gossip
/// frames are expected conditions and are not represented here.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Graph side length is zero
    ZeroSideLength,
    /// Adjacency matrix length does not match the vertex count squared
    AdjacencyMatrixSize { expected: usize, got: usize },
    /// Start or end vertex index is outside the graph
    VertexOutOfBounds { vertex: usize, vertex_count: usize },
    /// Constriction requires `fi1 + fi2 > 4`
    ConstrictionCoefficients { fi1: f64, fi2: f64 },
    /// Particle budget resolves to zero particles per group
    EmptyParticleBudget,
    /// Stagnation limit must be at least one iteration
    ZeroStagnationLimit,
    /// Waxman shape parameters must lie in `[0, 1]`
    WaxmanShape { alpha: f64, beta: f64 },
    /// Edge weight bounds must satisfy `0 < min < max < NO_EDGE`
    EdgeWeightBounds { min: u8, max: u8 },
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ZeroSideLength => write!(f, "graph side length is zero"),
            Error::AdjacencyMatrixSize { expected, got } => write!(
                f,
                "adjacency matrix has {} entries, expected {}",
                got, expected
            ),
            Error::VertexOutOfBounds {
                vertex,
                vertex_count,
            } => write!(
                f,
                "vertex index {} out of bounds for graph with {} vertices",
                vertex, vertex_count
            ),
            Error::ConstrictionCoefficients { fi1, fi2 } => write!(
                f,
                "constriction requires fi1 + fi2 > 4, got {} + {}",
                fi1, fi2
            ),
            Error::EmptyParticleBudget => write!(f, "particle budget resolves to zero particles"),
            Error::ZeroStagnationLimit => write!(f, "stagnation limit must be at least 1"),
            Error::WaxmanShape { alpha, beta } => write!(
                f,
                "waxman parameters must lie in [0, 1], got alpha = {}, beta = {}",
                alpha, beta
            ),
            Error::EdgeWeightBounds { min, max } => write!(
                f,
                "edge weight bounds must satisfy 0 < min < max < sentinel, got [{}, {}]",
                min, max
            ),
        }
    }
}
