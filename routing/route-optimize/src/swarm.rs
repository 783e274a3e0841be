//! Global-best particle swarm optimization.
//!
//! Each particle is a point in a box-bounded search space. Every iteration it
//! is pulled towards its own best position and the swarm's best position:
//!
//! ```text
//! v = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)
//! x = clamp(x + v, lower, upper)
//! ```
//!
//! All random draws come from one seeded [`StdRng`] in a fixed order, and
//! particle scores are folded into the swarm in index order after evaluation.
//! A fixed seed therefore gives bit-identical results whether particles are
//! evaluated sequentially or on the rayon thread pool.
//!
//! # Example
//!
//! ```
//! use route_optimize::swarm::{Objective, SearchSpace, SwarmOptimizer};
//! use route_types::SwarmConfig;
//!
//! /// Distance from (3, -2), squared.
//! struct Bowl;
//!
//! impl Objective for Bowl {
//!     fn evaluate(&self, x: &[f64]) -> f64 {
//!         (x[0] - 3.0).powi(2) + (x[1] + 2.0).powi(2)
//!     }
//! }
//!
//! let space = SearchSpace::new(vec![-10.0, -10.0], vec![10.0, 10.0]).unwrap();
//! let config = SwarmConfig::default().with_particles(20).with_iterations(80).with_seed(3);
//! let outcome = SwarmOptimizer::new(&Bowl, space, config).run();
//!
//! assert!(outcome.best_cost < 1e-2);
//! assert!((outcome.best_position[0] - 3.0).abs() < 0.1);
//! ```

use cf_planar::Bounds;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use route_types::{RoutingError, SwarmConfig};
use tracing::debug;

use crate::cancel::CancelToken;

/// A function to minimize over a flat position vector.
///
/// Implementations must be pure: the same position always scores the same.
pub trait Objective: Sync {
    /// Scores a position. Lower is better.
    fn evaluate(&self, position: &[f64]) -> f64;
}

/// Per-dimension lower and upper bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl SearchSpace {
    /// Creates a search space from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] if the bound vectors differ in
    /// length, a bound is not finite, or a lower bound exceeds its upper bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, RoutingError> {
        if lower.len() != upper.len() {
            return Err(RoutingError::invalid_config(format!(
                "search space has {} lower and {} upper bounds",
                lower.len(),
                upper.len()
            )));
        }
        for (d, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(RoutingError::invalid_config(format!(
                    "dimension {d} has invalid bounds [{lo}, {hi}]"
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Tiles a 2D box over `count` points, giving `2 * count` dimensions.
    ///
    /// # Errors
    ///
    /// See [`SearchSpace::new`].
    pub fn tiled(bounds: &Bounds, count: usize) -> Result<Self, RoutingError> {
        let lower = [bounds.min.x, bounds.min.y].repeat(count);
        let upper = [bounds.max.x, bounds.max.y].repeat(count);
        Self::new(lower, upper)
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width of dimension `d`.
    #[must_use]
    pub fn extent(&self, d: usize) -> f64 {
        self.upper[d] - self.lower[d]
    }

    /// Clamps a coordinate into dimension `d`.
    #[must_use]
    pub fn clamp(&self, d: usize, value: f64) -> f64 {
        value.clamp(self.lower[d], self.upper[d])
    }
}

/// One particle of the swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position.
    pub position: Vec<f64>,
    /// Current velocity.
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    /// Score of `best_position`.
    pub best_cost: f64,
}

/// Swarm state for one run.
#[derive(Debug, Clone)]
pub struct Swarm {
    particles: Vec<Particle>,
    best_position: Vec<f64>,
    best_cost: f64,
    rng: StdRng,
    iteration: usize,
    evaluations: usize,
}

impl Swarm {
    /// Returns the particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns the global best position.
    #[must_use]
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Returns the global best cost.
    #[must_use]
    pub const fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Number of completed iterations.
    #[must_use]
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Number of objective evaluations so far.
    #[must_use]
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Folds fresh scores into personal and global bests, in index order.
    ///
    /// Returns `true` if the global best improved.
    fn absorb(&mut self, costs: &[f64]) -> bool {
        self.evaluations += costs.len();
        let mut improved = false;
        for (particle, &cost) in self.particles.iter_mut().zip(costs) {
            if cost < particle.best_cost {
                particle.best_cost = cost;
                particle.best_position.clone_from(&particle.position);
            }
            if cost < self.best_cost {
                self.best_cost = cost;
                self.best_position.clone_from(&particle.position);
                improved = true;
            }
        }
        improved
    }
}

/// The result of a swarm run.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmOutcome {
    /// Best position found.
    pub best_position: Vec<f64>,
    /// Score of `best_position`.
    pub best_cost: f64,
    /// Global best after initialization and after each iteration.
    pub cost_history: Vec<f64>,
    /// Iterations completed.
    pub iterations: usize,
    /// Objective evaluations performed.
    pub evaluations: usize,
}

/// Runs particle swarm optimization on an [`Objective`].
#[derive(Debug)]
pub struct SwarmOptimizer<'a, O: Objective> {
    objective: &'a O,
    space: SearchSpace,
    config: SwarmConfig,
}

impl<'a, O: Objective> SwarmOptimizer<'a, O> {
    /// Creates an optimizer.
    #[must_use]
    pub const fn new(objective: &'a O, space: SearchSpace, config: SwarmConfig) -> Self {
        Self {
            objective,
            space,
            config,
        }
    }

    /// Returns the search space.
    #[must_use]
    pub const fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Returns the swarm configuration.
    #[must_use]
    pub const fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Places particles uniformly in the search space and scores them.
    ///
    /// Velocities are drawn uniformly from `±initial_velocity * extent`. The
    /// best initial particle becomes the global best; the lowest index wins
    /// ties.
    #[must_use]
    pub fn initialize(&self) -> Swarm {
        let mut rng = match self.config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dims = self.space.dimensions();
        let fraction = self.config.initial_velocity();

        let particles: Vec<Particle> = (0..self.config.particles())
            .map(|_| {
                let position: Vec<f64> = (0..dims)
                    .map(|d| {
                        let offset = rng.r#gen::<f64>() * self.space.extent(d);
                        self.space.clamp(d, self.space.lower[d] + offset)
                    })
                    .collect();
                let velocity: Vec<f64> = (0..dims)
                    .map(|d| {
                        let spread = fraction * self.space.extent(d);
                        rng.r#gen::<f64>().mul_add(2.0, -1.0) * spread
                    })
                    .collect();
                Particle {
                    best_position: position.clone(),
                    position,
                    velocity,
                    best_cost: f64::INFINITY,
                }
            })
            .collect();

        let mut swarm = Swarm {
            best_position: particles
                .first()
                .map(|p| p.position.clone())
                .unwrap_or_default(),
            particles,
            best_cost: f64::INFINITY,
            rng,
            iteration: 0,
            evaluations: 0,
        };
        let costs = self.score(&swarm.particles);
        swarm.absorb(&costs);
        swarm
    }

    /// Advances the swarm by one iteration.
    ///
    /// Returns `true` if the global best improved.
    pub fn step(&self, swarm: &mut Swarm) -> bool {
        let (w, c1, c2) = (
            self.config.inertia(),
            self.config.cognitive(),
            self.config.social(),
        );
        let limit = self.config.max_velocity();

        let Swarm {
            particles,
            best_position,
            rng,
            ..
        } = swarm;
        for particle in particles.iter_mut() {
            for d in 0..self.space.dimensions() {
                let r1: f64 = rng.r#gen();
                let r2: f64 = rng.r#gen();
                let x = particle.position[d];
                let mut v = w * particle.velocity[d]
                    + c1 * r1 * (particle.best_position[d] - x)
                    + c2 * r2 * (best_position[d] - x);
                if let Some(fraction) = limit {
                    let cap = fraction * self.space.extent(d);
                    v = v.clamp(-cap, cap);
                }
                particle.velocity[d] = v;
                particle.position[d] = self.space.clamp(d, x + v);
            }
        }

        let costs = self.score(&swarm.particles);
        swarm.iteration += 1;
        swarm.absorb(&costs)
    }

    /// Runs the full iteration budget.
    #[must_use]
    pub fn run(&self) -> SwarmOutcome {
        let mut swarm = self.initialize();
        let mut cost_history = Vec::with_capacity(self.config.iterations() + 1);
        cost_history.push(swarm.best_cost);
        for _ in 0..self.config.iterations() {
            self.advance(&mut swarm);
            cost_history.push(swarm.best_cost);
        }
        Self::finish(swarm, cost_history)
    }

    /// Runs the full iteration budget, checking `cancel` before
    /// initialization and before every iteration.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Cancelled`] if the token is cancelled.
    pub fn run_with_cancel(
        &self,
        cancel: Option<&CancelToken>,
    ) -> Result<SwarmOutcome, RoutingError> {
        let check = || cancel.map_or(Ok(()), CancelToken::check);

        check()?;
        let mut swarm = self.initialize();
        let mut cost_history = Vec::with_capacity(self.config.iterations() + 1);
        cost_history.push(swarm.best_cost);
        for _ in 0..self.config.iterations() {
            check()?;
            self.advance(&mut swarm);
            cost_history.push(swarm.best_cost);
        }
        Ok(Self::finish(swarm, cost_history))
    }

    fn advance(&self, swarm: &mut Swarm) {
        if self.step(swarm) {
            debug!(
                iteration = swarm.iteration,
                best_cost = swarm.best_cost,
                "global best improved"
            );
        }
    }

    fn finish(swarm: Swarm, cost_history: Vec<f64>) -> SwarmOutcome {
        SwarmOutcome {
            best_position: swarm.best_position,
            best_cost: swarm.best_cost,
            cost_history,
            iterations: swarm.iteration,
            evaluations: swarm.evaluations,
        }
    }

    /// Scores every particle at its current position.
    fn score(&self, particles: &[Particle]) -> Vec<f64> {
        if self.config.parallel() {
            particles
                .par_iter()
                .map(|p| self.objective.evaluate(&p.position))
                .collect()
        } else {
            particles
                .iter()
                .map(|p| self.objective.evaluate(&p.position))
                .collect()
        }
    }
}
