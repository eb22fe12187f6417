//! Fan-out of a particle budget across independent worker threads.
//!
//! Every group is single-threaded and owns all of its mutable state; the
//! workers share nothing but the read-only task, so the only
//! synchronization point is the final join before aggregation.

use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::group::{HistoryEntry, SwarmConfig, SwarmGroup};
use crate::path::GraphPath;
use crate::task::Task;
use crate::traits::{Gossip, NoGossip};
use crate::{Error, Result};

/// Tunables for a full multi-group run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Worker count; `0` means one per available hardware thread
    pub group_count: usize,
    /// Total particle budget, split evenly across groups
    pub total_particles: usize,
    /// Iteration budget per group
    pub iteration_count: usize,
    /// Stagnation limit per group
    pub stagnation_limit: usize,
    /// Constriction coefficients, `fi1 + fi2 > 4`
    pub fi1: f64,
    /// See `fi1`
    pub fi2: f64,
    /// Master seed; per-group seeds are drawn sequentially from it
    pub seed: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            group_count: 0,
            total_particles: 512,
            iteration_count: 200,
            stagnation_limit: 20,
            fi1: 2.05,
            fi2: 2.05,
            seed: 0,
        }
    }
}

/// Aggregated result of a run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Best path across all groups, `None` when nothing complete was found
    pub best: Option<GraphPath>,
    /// Each group's improvement history, in group order
    pub histories: Vec<Vec<HistoryEntry>>,
}

/// Splits the particle budget across worker threads, runs every group to
/// completion and merges the results.
#[derive(Debug, Clone)]
pub struct SwarmRunner {
    config: RunnerConfig,
}

impl SwarmRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run all groups without any cross-process gossip.
    pub fn run(&self, task: &Task<'_>) -> Result<RunOutcome> {
        self.run_with_gossip(task, |_| NoGossip)
    }

    /// Run all groups, wiring each to the gossip handle the factory yields
    /// for its index. Lets callers simulate (or attach) a peer fabric.
    pub fn run_with_gossip<G, F>(&self, task: &Task<'_>, mut make_gossip: F) -> Result<RunOutcome>
    where
        G: Gossip + Send,
        F: FnMut(usize) -> G,
    {
        let group_count = match self.config.group_count {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        };

        // Even split; a budget too small to give every group a particle is
        // a configuration error, not a silent empty group.
        let particle_count = self.config.total_particles / group_count;
        if particle_count == 0 {
            return Err(Error::EmptyParticleBudget);
        }

        let swarm_config = SwarmConfig {
            particle_count,
            iteration_count: self.config.iteration_count,
            stagnation_limit: self.config.stagnation_limit,
            fi1: self.config.fi1,
            fi2: self.config.fi2,
        };

        // One master RNG hands every group its own seed, so group streams
        // never collide.
        let mut master = StdRng::seed_from_u64(self.config.seed);
        let mut groups = (0..group_count)
            .map(|group_id| {
                let seed = master.gen();
                SwarmGroup::new(*task, swarm_config.clone(), seed, make_gossip(group_id))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(group_count, particle_count, "starting swarm workers");

        thread::scope(|scope| {
            for (group_id, group) in groups.iter_mut().enumerate() {
                scope.spawn(move || {
                    let found = group.run();
                    debug!(group_id, found, "worker finished");
                });
            }
        });

        let mut best: Option<GraphPath> = None;
        let mut histories = Vec::with_capacity(groups.len());
        for group in groups {
            let (group_best, history) = group.into_outcome();
            if let Some(candidate) = group_best {
                // Ties keep the earlier group's result.
                if best
                    .as_ref()
                    .map_or(true, |current| candidate.is_better_than(current))
                {
                    best = Some(candidate);
                }
            }
            histories.push(history);
        }

        Ok(RunOutcome { best, histories })
    }
}
