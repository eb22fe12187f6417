//! One swarm group: a collection of particles sharing a random source.
//!
//! A group is single-threaded by construction. Everything it owns, from
//! the particles to the best path and history, is touched from one execution
//! context, so the hot loop needs no locks. The only outside contact is
//! the read-only task and the best-effort [`Gossip`] channel.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::particle::Particle;
use crate::path::GraphPath;
use crate::task::Task;
use crate::traits::Gossip;
use crate::{Error, Result};

/// Tunables for one swarm group.
#[derive(Debug, Clone)]
pub struct SwarmConfig {
    /// Number of particles in the group
    pub particle_count: usize,
    /// Fixed iteration budget; the group always runs it to completion
    pub iteration_count: usize,
    /// Full iterations without any particle improving before a soft reset
    pub stagnation_limit: usize,
    /// Attraction toward the particle's own best (`fi1 + fi2 > 4`)
    pub fi1: f64,
    /// Attraction toward the group best
    pub fi2: f64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            particle_count: 64,
            iteration_count: 200,
            stagnation_limit: 20,
            fi1: 2.05,
            fi2: 2.05,
        }
    }
}

impl SwarmConfig {
    /// Reject parameters the algorithm cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.fi1 + self.fi2 <= 4.0 {
            return Err(Error::ConstrictionCoefficients {
                fi1: self.fi1,
                fi2: self.fi2,
            });
        }
        if self.particle_count == 0 {
            return Err(Error::EmptyParticleBudget);
        }
        if self.stagnation_limit == 0 {
            return Err(Error::ZeroStagnationLimit);
        }
        Ok(())
    }
}

/// Appended whenever the group best improves; read-only after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Steady-clock offset from the start of the group's run
    pub elapsed: Duration,
    /// Iteration during which the improvement was found
    pub iteration: usize,
    /// The improved path weight
    pub weight: u64,
}

/// One independent swarm over a shared read-only task.
#[derive(Debug)]
pub struct SwarmGroup<'g, G: Gossip> {
    task: Task<'g>,
    config: SwarmConfig,
    rng: StdRng,
    gossip: G,
    particles: Vec<Particle>,
    best: Option<GraphPath>,
    history: Vec<HistoryEntry>,
}

impl<'g, G: Gossip> SwarmGroup<'g, G> {
    /// Create a group with its own seeded random source.
    ///
    /// Fails fast on invalid configuration; nothing iterates afterwards if
    /// this returns an error.
    pub fn new(task: Task<'g>, config: SwarmConfig, seed: u64, gossip: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            task,
            config,
            rng: StdRng::seed_from_u64(seed),
            gossip,
            particles: Vec::new(),
            best: None,
            history: Vec::new(),
        })
    }

    /// Best path known to this group, locally found or adopted from peers
    pub fn best(&self) -> Option<&GraphPath> {
        self.best.as_ref()
    }

    /// Improvement history, ordered by iteration
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Consume the group, yielding its best path and history.
    pub fn into_outcome(self) -> (Option<GraphPath>, Vec<HistoryEntry>) {
        (self.best, self.history)
    }

    /// Run the full iteration budget. Returns whether a group best was
    /// ever established.
    pub fn run(&mut self) -> bool {
        let started = Instant::now();

        self.particles = (0..self.config.particle_count)
            .map(|_| Particle::new(self.task.graph().vertex_count(), &mut self.rng))
            .collect();

        // Consecutive iterations in which no particle improved itself.
        let mut stagnant_iterations = 0;

        for iteration in 0..self.config.iteration_count {
            debug!(iteration, "swarm iteration");

            self.integrate_inbound();

            let mut any_particle_improved = false;

            for particle_id in 0..self.particles.len() {
                let particle = &mut self.particles[particle_id];
                let particle_improved = particle.run(&self.task);
                any_particle_improved = any_particle_improved || particle_improved;

                // Did this particle push the group best forward?
                let candidate = if particle_improved {
                    particle
                        .best()
                        .filter(|c| self.best.as_ref().map_or(true, |b| c.is_better_than(b)))
                        .cloned()
                } else {
                    None
                };

                if let Some(candidate) = candidate {
                    let weight = candidate.weight();
                    info!(iteration, particle_id, weight, "group best improved");
                    self.history.push(HistoryEntry {
                        elapsed: started.elapsed(),
                        iteration,
                        weight,
                    });
                    // Locally discovered improvements are published to every
                    // peer; adopted ones are not rebroadcast.
                    self.gossip.publish(candidate.priorities(), weight);
                    self.best = Some(candidate);
                }

                let particle = &mut self.particles[particle_id];
                particle.update(self.config.fi1, self.config.fi2, self.best.as_ref(), &mut self.rng);
            }

            if any_particle_improved {
                stagnant_iterations = 0;
            } else {
                stagnant_iterations += 1;
                if stagnant_iterations >= self.config.stagnation_limit {
                    info!(iteration, "stagnated, reinitializing particles");
                    for particle in &mut self.particles {
                        particle.random_initialize(&mut self.rng);
                    }
                    stagnant_iterations = 0;
                }
            }
        }

        self.best.is_some()
    }

    /// Drain every already-arrived gossip payload and adopt strict
    /// improvements. One pass per iteration, no waiting.
    fn integrate_inbound(&mut self) {
        while let Some((priorities, advertised_weight)) = self.gossip.try_next() {
            if priorities.len() != self.task.graph().vertex_count() {
                trace!(
                    got = priorities.len(),
                    advertised_weight,
                    "dropping gossip payload sized for a different graph"
                );
                continue;
            }

            // Re-decode locally; the graph is shared, so the walk lands on
            // the same vertices the sender saw and the weight stays the
            // literal edge sum even against a corrupt frame.
            let Some(path) = GraphPath::from_priorities(&self.task, &priorities) else {
                trace!(advertised_weight, "dropping undecodable gossip payload");
                continue;
            };

            if self
                .best
                .as_ref()
                .map_or(true, |best| path.is_better_than(best))
            {
                trace!(weight = path.weight(), "adopting gossiped best");
                self.best = Some(path);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::traits::NoGossip;
    use std::collections::VecDeque;

    fn diamond() -> Graph {
        Graph::from_edges(2, &[(0, 1, 5), (1, 3, 5), (0, 2, 100), (2, 3, 100)]).unwrap()
    }

    fn config(particles: usize, iterations: usize) -> SwarmConfig {
        SwarmConfig {
            particle_count: particles,
            iteration_count: iterations,
            stagnation_limit: 5,
            fi1: 2.05,
            fi2: 2.05,
        }
    }

    /// Scripted gossip stub: hands out queued payloads, records publishes.
    #[derive(Default)]
    struct ScriptedGossip {
        inbox: VecDeque<(Vec<f64>, u64)>,
        published: Vec<u64>,
    }

    impl Gossip for ScriptedGossip {
        fn publish(&mut self, _priorities: &[f64], weight: u64) {
            self.published.push(weight);
        }

        fn try_next(&mut self) -> Option<(Vec<f64>, u64)> {
            self.inbox.pop_front()
        }
    }

    #[test]
    fn rejects_bad_configuration() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();

        let mut c = config(8, 10);
        c.fi1 = 1.0;
        c.fi2 = 1.0;
        assert!(matches!(
            SwarmGroup::new(task, c, 1, NoGossip).unwrap_err(),
            Error::ConstrictionCoefficients { .. }
        ));

        let mut c = config(8, 10);
        c.particle_count = 0;
        assert_eq!(
            SwarmGroup::new(task, c, 1, NoGossip).unwrap_err(),
            Error::EmptyParticleBudget
        );

        let mut c = config(8, 10);
        c.stagnation_limit = 0;
        assert_eq!(
            SwarmGroup::new(task, c, 1, NoGossip).unwrap_err(),
            Error::ZeroStagnationLimit
        );
    }

    #[test]
    fn converges_on_the_cheap_route() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut group = SwarmGroup::new(task, config(32, 100), 42, NoGossip).unwrap();
        assert!(group.run());
        let best = group.best().unwrap();
        assert_eq!(best.weight(), 10);
        assert_eq!(best.vertices(), &[0, 1, 3]);
    }

    #[test]
    fn history_weights_never_increase() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut group = SwarmGroup::new(task, config(16, 50), 7, NoGossip).unwrap();
        group.run();
        let history = group.history();
        assert!(!history.is_empty());
        assert!(history.windows(2).all(|w| w[1].weight < w[0].weight));
        assert!(history.windows(2).all(|w| w[1].iteration >= w[0].iteration));
    }

    #[test]
    fn unreachable_destination_finds_nothing() {
        // Two disconnected components.
        let g = Graph::from_edges(2, &[(0, 1, 5), (2, 3, 5)]).unwrap();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut group = SwarmGroup::new(task, config(16, 30), 3, NoGossip).unwrap();
        assert!(!group.run());
        assert!(group.best().is_none());
        assert!(group.history().is_empty());
    }

    #[test]
    fn adopts_strictly_better_gossip_without_rebroadcast() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();

        // Inbound frame advertising the cheap route.
        let mut gossip = ScriptedGossip::default();
        gossip.inbox.push_back((vec![1.0, 0.1, 0.9, 0.1], 10));

        let mut c = config(4, 1);
        c.stagnation_limit = 1;
        let mut group = SwarmGroup::new(task, c, 23, gossip).unwrap();
        group.run();

        assert_eq!(group.best().unwrap().weight(), 10);
        // The adopted best was never republished: every published weight
        // would have to beat 10, and on this graph nothing can.
        assert!(group.gossip.published.iter().all(|&w| w < 10));
        // Network adoptions do not generate history entries either.
        assert!(group.history.iter().all(|entry| entry.weight < 10));
    }

    #[test]
    fn ignores_equal_or_worse_gossip() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();

        let mut gossip = ScriptedGossip::default();
        // Expensive route first, cheap one second, expensive again.
        gossip.inbox.push_back((vec![1.0, 0.9, 0.001, 0.1], 200));
        gossip.inbox.push_back((vec![1.0, 0.1, 0.9, 0.1], 10));
        gossip.inbox.push_back((vec![1.0, 0.9, 0.001, 0.1], 200));

        let mut group = SwarmGroup::new(task, config(1, 1), 29, gossip).unwrap();
        group.run();
        assert_eq!(group.best().unwrap().weight(), 10);
    }

    #[test]
    fn dropped_frames_are_skipped() {
        // Priorities that strand the decode locally are discarded.
        let g = Graph::from_edges(2, &[(0, 1, 5), (2, 3, 5)]).unwrap();
        let task = Task::new(&g, 0, 3).unwrap();

        let mut gossip = ScriptedGossip::default();
        gossip.inbox.push_back((vec![0.5; 4], 1));
        // Sized for some other graph entirely.
        gossip.inbox.push_back((vec![0.5; 2], 1));

        let mut group = SwarmGroup::new(task, config(1, 1), 31, gossip).unwrap();
        group.run();
        assert!(group.best().is_none());
    }

    #[test]
    fn stagnation_redraws_particle_positions() {
        // No complete path exists, so no particle ever improves and the
        // stagnation counter fires on schedule.
        let g = Graph::from_edges(2, &[(0, 1, 5), (2, 3, 5)]).unwrap();
        let task = Task::new(&g, 0, 3).unwrap();

        // Same seed, identical draw streams; the reset is the only place
        // the two runs can diverge.
        let mut resetting = config(4, 4);
        resetting.stagnation_limit = 2;
        let mut steady = config(4, 4);
        steady.stagnation_limit = 100;

        let mut a = SwarmGroup::new(task, resetting, 55, NoGossip).unwrap();
        let mut b = SwarmGroup::new(task, steady, 55, NoGossip).unwrap();
        assert!(!a.run());
        assert!(!b.run());

        let positions = |group: &SwarmGroup<'_, NoGossip>| {
            group
                .particles()
                .iter()
                .map(|p| p.priorities().to_vec())
                .collect::<Vec<_>>()
        };
        assert_ne!(positions(&a), positions(&b));
    }

    #[test]
    fn stagnation_reinitializes_particles_but_keeps_best() {
        // With only the trivial component reachable, nothing improves after
        // the first iteration and the reset must kick in.
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut c = config(8, 30);
        c.stagnation_limit = 2;
        let mut group = SwarmGroup::new(task, c, 99, NoGossip).unwrap();
        group.run();

        // The best survives every reset along the way.
        assert_eq!(group.best().unwrap().weight(), 10);
    }
}
