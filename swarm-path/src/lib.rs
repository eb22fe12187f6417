//! # swarm-path
//!
//! Low-weight path search on weighted graphs with Particle Swarm
//! Optimization, decoded from per-vertex priority vectors and executed
//! concurrently across worker groups that can gossip improvements to
//! each other.
//!
//! ## Quick start
//!
//! ```rust
//! use swarm_path::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), swarm_path::SearchError> {
//! let mut rng = StdRng::seed_from_u64(7);
//! let graph = Graph::waxman(&mut rng, 6, 1.0, 0.3, 10, 100)?;
//! let task = Task::new(&graph, 0, graph.vertex_count() - 1)?;
//!
//! let outcome = PathSearch::new()
//!     .groups(2)
//!     .total_particles(128)
//!     .iterations(100)
//!     .run(&task)?;
//!
//! if let Some(best) = &outcome.best {
//!     println!("{}", best.dump(&graph));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate structure
//!
//! - [`swarm_path_core`]: decoding, particles, swarm groups, runner
//! - [`swarm_path_net`]: gossip wire format and in-process fabric

// Re-export sub-crates
pub use swarm_path_core as core;
pub use swarm_path_net as net;

// Re-export commonly used items at the top level
pub use swarm_path_core::{
    graph::{EdgeWeight, Graph, VertexIndex, NO_EDGE},
    group::{HistoryEntry, SwarmConfig, SwarmGroup},
    path::GraphPath,
    runner::{RunOutcome, RunnerConfig, SwarmRunner},
    task::Task,
    traits::{Gossip, NoGossip},
};
pub use swarm_path_net::{GossipEndpoint, GossipHub};

pub mod report;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::net::prelude::*;

    pub use crate::report::HistoryReport;
    pub use crate::{PathSearch, SearchError};
}

/// Errors surfaced by the high-level search facade.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid graph, task or swarm parameters
    #[error("invalid search configuration: {0}")]
    Config(#[from] swarm_path_core::Error),
    /// Report output failed
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder-style front door over [`SwarmRunner`].
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    config: RunnerConfig,
}

impl PathSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Worker group count; `0` picks one per hardware thread.
    pub fn groups(mut self, group_count: usize) -> Self {
        self.config.group_count = group_count;
        self
    }

    /// Total particle budget, split evenly across groups.
    pub fn total_particles(mut self, total: usize) -> Self {
        self.config.total_particles = total;
        self
    }

    /// Iteration budget per group.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.iteration_count = iterations;
        self
    }

    /// Iterations without improvement before a soft reset.
    pub fn stagnation_limit(mut self, limit: usize) -> Self {
        self.config.stagnation_limit = limit;
        self
    }

    /// Constriction coefficients; their sum must exceed 4.
    pub fn coefficients(mut self, fi1: f64, fi2: f64) -> Self {
        self.config.fi1 = fi1;
        self.config.fi2 = fi2;
        self
    }

    /// Master seed for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// The underlying runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run the search without inter-process gossip.
    pub fn run(&self, task: &Task<'_>) -> Result<RunOutcome, SearchError> {
        let outcome = SwarmRunner::new(self.config.clone()).run(task)?;
        Ok(outcome)
    }

    /// Run the search with every group attached to the given gossip
    /// factory (one handle per group index).
    pub fn run_with_gossip<G, F>(
        &self,
        task: &Task<'_>,
        make_gossip: F,
    ) -> Result<RunOutcome, SearchError>
    where
        G: Gossip + Send,
        F: FnMut(usize) -> G,
    {
        let outcome = SwarmRunner::new(self.config.clone()).run_with_gossip(task, make_gossip)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_the_runner_config() {
        let search = PathSearch::new()
            .groups(3)
            .total_particles(96)
            .iterations(40)
            .stagnation_limit(4)
            .coefficients(2.1, 2.2)
            .seed(11);
        let config = search.config();
        assert_eq!(config.group_count, 3);
        assert_eq!(config.total_particles, 96);
        assert_eq!(config.iteration_count, 40);
        assert_eq!(config.stagnation_limit, 4);
        assert!((config.fi1 - 2.1).abs() < f64::EPSILON);
        assert!((config.fi2 - 2.2).abs() < f64::EPSILON);
        assert_eq!(config.seed, 11);
    }

    #[test]
    fn bad_coefficients_surface_as_config_error() {
        let graph = Graph::from_edges(2, &[(0, 1, 5)]).unwrap();
        let task = Task::new(&graph, 0, 1).unwrap();
        let result = PathSearch::new().groups(1).coefficients(1.0, 1.0).run(&task);
        assert!(matches!(result, Err(SearchError::Config(_))));
    }
}
