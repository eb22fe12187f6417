//! A single PSO particle with cost-priority encoding.
//!
//! Follows the constricted update of Clerc/Kennedy: with `phi = fi1 + fi2`
//! strictly above 4 the factor `chi` bounds the oscillation of the swarm,
//! so velocities need no explicit clamp.

use rand::Rng;

use crate::path::GraphPath;
use crate::task::Task;

/// One particle: a priority vector, its velocity, and the best complete
/// path this particle has decoded so far.
#[derive(Debug, Clone)]
pub struct Particle {
    priorities: Vec<f64>,
    velocities: Vec<f64>,
    best: Option<GraphPath>,
}

impl Particle {
    /// Create a randomly initialized particle over `vertex_count` vertices.
    pub fn new<R: Rng>(vertex_count: usize, rng: &mut R) -> Self {
        let mut particle = Self {
            priorities: vec![0.0; vertex_count],
            velocities: vec![0.0; vertex_count],
            best: None,
        };
        particle.random_initialize(rng);
        particle
    }

    /// Redraw every priority and velocity uniformly from `[0, 1]`.
    ///
    /// Soft reset: the recorded best path survives, only the particle's
    /// position in encoding space is re-seeded. Used at construction and
    /// when the owning group stagnates.
    pub fn random_initialize<R: Rng>(&mut self, rng: &mut R) {
        for priority in &mut self.priorities {
            *priority = rng.gen();
        }
        for velocity in &mut self.velocities {
            *velocity = rng.gen();
        }
    }

    /// Best path found by this particle so far
    pub fn best(&self) -> Option<&GraphPath> {
        self.best.as_ref()
    }

    /// Decode the current priorities and keep the result if it strictly
    /// improves on this particle's best. Returns whether it did.
    ///
    /// A stranded decode or a tie contributes nothing this iteration.
    pub fn run(&mut self, task: &Task<'_>) -> bool {
        let Some(candidate) = GraphPath::from_priorities(task, &self.priorities) else {
            return false;
        };

        if let Some(best) = &self.best {
            if best.weight() <= candidate.weight() {
                return false;
            }
        }

        self.best = Some(candidate);
        true
    }

    /// Constricted velocity/position update.
    ///
    /// Per vertex, with fresh uniform draws `r1`, `r2`:
    ///
    /// ```text
    /// v[i] = chi * (v[i] + fi1*r1*(local[i] - p[i]) + fi2*r2*(global[i] - p[i]))
    /// p[i] += v[i]
    /// ```
    ///
    /// `local` is this particle's best encoding (or its current position
    /// before any best exists); `global` is the group best, falling back
    /// to `local`. Priorities are deliberately left unclamped: the decoder
    /// only reads their relative order.
    pub fn update<R: Rng>(
        &mut self,
        fi1: f64,
        fi2: f64,
        group_best: Option<&GraphPath>,
        rng: &mut R,
    ) {
        let phi = fi1 + fi2;
        let chi = 1.0 / (2.0 * (2.0 - phi - (phi * phi - 4.0 * phi).sqrt()).abs());

        for i in 0..self.priorities.len() {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();

            let target_local = match &self.best {
                Some(best) => best.priorities()[i],
                None => self.priorities[i],
            };
            let target_global = match group_best {
                Some(best) => best.priorities()[i],
                None => target_local,
            };

            self.velocities[i] = chi
                * (self.velocities[i]
                    + fi1 * r1 * (target_local - self.priorities[i])
                    + fi2 * r2 * (target_global - self.priorities[i]));
            self.priorities[i] += self.velocities[i];
        }
    }

    #[cfg(test)]
    pub(crate) fn priorities(&self) -> &[f64] {
        &self.priorities
    }

    #[cfg(test)]
    pub(crate) fn velocities(&self) -> &[f64] {
        &self.velocities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn diamond() -> Graph {
        Graph::from_edges(2, &[(0, 1, 5), (1, 3, 5), (0, 2, 100), (2, 3, 100)]).unwrap()
    }

    #[test]
    fn initialization_draws_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let particle = Particle::new(16, &mut rng);
        assert!(particle.priorities().iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(particle.velocities().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn run_keeps_only_strict_improvements() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut particle = Particle::new(4, &mut rng);

        // Force the cheap route first.
        particle.priorities.copy_from_slice(&[1.0, 0.1, 0.9, 0.1]);
        assert!(particle.run(&task));
        assert_eq!(particle.best().unwrap().weight(), 10);

        // Same encoding again: same weight, a tie is not an improvement.
        assert!(!particle.run(&task));

        // A worse route does not replace the best.
        particle.priorities.copy_from_slice(&[1.0, 0.9, 0.001, 0.1]);
        assert!(!particle.run(&task));
        assert_eq!(particle.best().unwrap().weight(), 10);
    }

    #[test]
    fn run_reports_nothing_on_stranded_decode() {
        let g = Graph::from_edges(2, &[(0, 1, 5)]).unwrap();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut particle = Particle::new(4, &mut rng);
        assert!(!particle.run(&task));
        assert!(particle.best().is_none());
    }

    #[test]
    fn soft_reset_preserves_best() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let mut particle = Particle::new(4, &mut rng);
        particle.priorities.copy_from_slice(&[1.0, 0.1, 0.9, 0.1]);
        assert!(particle.run(&task));

        let before = particle.priorities().to_vec();
        particle.random_initialize(&mut rng);
        assert_ne!(particle.priorities(), &before[..]);
        assert_eq!(particle.best().unwrap().weight(), 10);
    }

    #[test]
    fn update_pulls_toward_group_best() {
        let g = diamond();
        let task = Task::new(&g, 0, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let group_best = GraphPath::from_priorities(&task, &[1.0, 0.1, 0.9, 0.1]).unwrap();

        let mut particle = Particle::new(4, &mut rng);
        let before = particle.priorities().to_vec();
        particle.update(2.05, 2.05, Some(&group_best), &mut rng);
        assert_ne!(particle.priorities(), &before[..]);
        assert!(particle.priorities().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn update_without_any_best_is_stable() {
        // local == global == current position, the attraction terms vanish
        // and only the damped velocity moves the particle.
        let mut rng = StdRng::seed_from_u64(19);
        let mut particle = Particle::new(4, &mut rng);
        particle.update(2.05, 2.05, None, &mut rng);
        assert!(particle.priorities().iter().all(|p| p.is_finite()));
        assert!(particle.velocities().iter().all(|v| v.is_finite()));
    }
}
