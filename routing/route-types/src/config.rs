//! Configuration for highway placement.
//!
//! [`HighwayConfig`] holds the placement parameters (waypoint count, visibility
//! radius, penalties, layer costs) and nests a [`SwarmConfig`] for the particle
//! swarm that searches over waypoint layouts.
//!
//! # Example
//!
//! ```
//! use route_types::{HighwayConfig, LayerCosts, SwarmConfig};
//!
//! let config = HighwayConfig::default()
//!     .with_waypoint_count(4)
//!     .with_radius(300.0)
//!     .with_layer_costs(LayerCosts::default().with_switch(120.0))
//!     .with_swarm(SwarmConfig::default().with_particles(30).with_seed(7));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.swarm().seed(), Some(7));
//! ```

use crate::RoutingError;
use crate::cost::LayerCosts;

/// Checks that a value is finite and strictly positive.
fn require_positive(name: &str, value: f64) -> Result<(), RoutingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RoutingError::invalid_config(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

/// Checks that a value is finite and not negative.
fn require_non_negative(name: &str, value: f64) -> Result<(), RoutingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RoutingError::invalid_config(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

/// Particle swarm parameters.
///
/// Uses the global-best, inertia-weighted update:
///
/// ```text
/// v = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)
/// x = clamp(x + v)
/// ```
///
/// # Example
///
/// ```
/// use route_types::SwarmConfig;
///
/// let swarm = SwarmConfig::default()
///     .with_iterations(200)
///     .with_inertia(0.6)
///     .with_max_velocity(0.2)
///     .with_parallel(true);
///
/// assert_eq!(swarm.iterations(), 200);
/// assert_eq!(swarm.max_velocity(), Some(0.2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SwarmConfig {
    /// Number of swarm iterations after initialization.
    iterations: usize,
    /// Number of particles.
    particles: usize,
    /// Inertia weight `w`.
    inertia: f64,
    /// Cognitive coefficient `c1` (pull towards the personal best).
    cognitive: f64,
    /// Social coefficient `c2` (pull towards the global best).
    social: f64,
    /// RNG seed; `None` draws from OS entropy.
    seed: Option<u64>,
    /// Initial velocity range as a fraction of the bounds extent.
    initial_velocity: f64,
    /// Optional per-dimension speed limit as a fraction of the bounds extent.
    max_velocity: Option<f64>,
    /// Evaluate particles on the rayon thread pool.
    parallel: bool,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            iterations: 120,
            particles: 60,
            inertia: 0.7,
            cognitive: 1.4,
            social: 1.6,
            seed: None,
            initial_velocity: 0.1,
            max_velocity: None,
            parallel: false,
        }
    }
}

impl SwarmConfig {
    /// Creates a swarm configuration with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration budget. Zero keeps the best initial particle.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the number of particles.
    #[must_use]
    pub const fn with_particles(mut self, particles: usize) -> Self {
        self.particles = particles;
        self
    }

    /// Sets the inertia weight.
    #[must_use]
    pub const fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets the cognitive coefficient.
    #[must_use]
    pub const fn with_cognitive(mut self, cognitive: f64) -> Self {
        self.cognitive = cognitive;
        self
    }

    /// Sets the social coefficient.
    #[must_use]
    pub const fn with_social(mut self, social: f64) -> Self {
        self.social = social;
        self
    }

    /// Fixes the RNG seed, making runs reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clears the seed so each run draws from OS entropy.
    #[must_use]
    pub const fn without_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Sets the initial velocity range as a fraction of the bounds extent.
    #[must_use]
    pub const fn with_initial_velocity(mut self, fraction: f64) -> Self {
        self.initial_velocity = fraction;
        self
    }

    /// Limits particle speed per dimension to a fraction of the bounds extent.
    #[must_use]
    pub const fn with_max_velocity(mut self, fraction: f64) -> Self {
        self.max_velocity = Some(fraction);
        self
    }

    /// Enables or disables parallel particle evaluation.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the iteration budget.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the number of particles.
    #[must_use]
    pub const fn particles(&self) -> usize {
        self.particles
    }

    /// Returns the inertia weight.
    #[must_use]
    pub const fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns the cognitive coefficient.
    #[must_use]
    pub const fn cognitive(&self) -> f64 {
        self.cognitive
    }

    /// Returns the social coefficient.
    #[must_use]
    pub const fn social(&self) -> f64 {
        self.social
    }

    /// Returns the RNG seed, if fixed.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the initial velocity fraction.
    #[must_use]
    pub const fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Returns the speed limit fraction, if any.
    #[must_use]
    pub const fn max_velocity(&self) -> Option<f64> {
        self.max_velocity
    }

    /// Returns `true` if particles are evaluated in parallel.
    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the swarm parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] if there are no particles, a
    /// coefficient is not finite, or a velocity fraction is out of range.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.particles == 0 {
            return Err(RoutingError::invalid_config(
                "particle count must be at least 1",
            ));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive coefficient", self.cognitive),
            ("social coefficient", self.social),
        ] {
            if !value.is_finite() {
                return Err(RoutingError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        require_non_negative("initial velocity", self.initial_velocity)?;
        if let Some(limit) = self.max_velocity {
            require_positive("max velocity", limit)?;
        }
        Ok(())
    }
}

/// Highway placement parameters.
///
/// Defaults: 6 waypoints, radius 250, penalty `1e7`, spread penalty off.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HighwayConfig {
    /// Number of waypoints to place (M).
    waypoint_count: usize,
    /// Maximum length of a direct connection (R).
    radius: f64,
    /// Penalty per invalid waypoint and per unreachable demand.
    big_penalty: f64,
    /// Layer cost coefficients.
    layer_costs: LayerCosts,
    /// Weight of the waypoint spread penalty; zero disables it.
    spread_lambda: f64,
    /// Length scale of the waypoint spread penalty.
    spread_scale: f64,
    /// Particle swarm parameters.
    swarm: SwarmConfig,
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            waypoint_count: 6,
            radius: 250.0,
            big_penalty: 1e7,
            layer_costs: LayerCosts::default(),
            spread_lambda: 0.0,
            spread_scale: 100.0,
            swarm: SwarmConfig::default(),
        }
    }
}

impl HighwayConfig {
    /// Creates a configuration with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of waypoints.
    #[must_use]
    pub const fn with_waypoint_count(mut self, count: usize) -> Self {
        self.waypoint_count = count;
        self
    }

    /// Sets the connection radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the penalty for invalid waypoints and unreachable demands.
    #[must_use]
    pub const fn with_big_penalty(mut self, penalty: f64) -> Self {
        self.big_penalty = penalty;
        self
    }

    /// Sets the layer cost coefficients.
    #[must_use]
    pub const fn with_layer_costs(mut self, costs: LayerCosts) -> Self {
        self.layer_costs = costs;
        self
    }

    /// Enables the spread penalty `lambda * sum(exp(-d / scale))`.
    #[must_use]
    pub const fn with_spread(mut self, lambda: f64, scale: f64) -> Self {
        self.spread_lambda = lambda;
        self.spread_scale = scale;
        self
    }

    /// Sets the swarm parameters.
    #[must_use]
    pub fn with_swarm(mut self, swarm: SwarmConfig) -> Self {
        self.swarm = swarm;
        self
    }

    /// Returns the number of waypoints.
    #[must_use]
    pub const fn waypoint_count(&self) -> usize {
        self.waypoint_count
    }

    /// Returns the connection radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the penalty for invalid waypoints and unreachable demands.
    #[must_use]
    pub const fn big_penalty(&self) -> f64 {
        self.big_penalty
    }

    /// Returns the layer cost coefficients.
    #[must_use]
    pub const fn layer_costs(&self) -> &LayerCosts {
        &self.layer_costs
    }

    /// Returns the spread penalty weight.
    #[must_use]
    pub const fn spread_lambda(&self) -> f64 {
        self.spread_lambda
    }

    /// Returns the spread penalty length scale.
    #[must_use]
    pub const fn spread_scale(&self) -> f64 {
        self.spread_scale
    }

    /// Returns the swarm parameters.
    #[must_use]
    pub const fn swarm(&self) -> &SwarmConfig {
        &self.swarm
    }

    /// Validates every parameter, including the nested swarm configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] describing the first invalid
    /// parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::HighwayConfig;
    ///
    /// assert!(HighwayConfig::default().validate().is_ok());
    /// assert!(HighwayConfig::default().with_waypoint_count(0).validate().is_err());
    /// assert!(HighwayConfig::default().with_radius(-1.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.waypoint_count == 0 {
            return Err(RoutingError::invalid_config(
                "waypoint count must be at least 1",
            ));
        }
        require_positive("radius", self.radius)?;
        require_positive("big penalty", self.big_penalty)?;
        self.layer_costs.validate()?;
        require_non_negative("spread lambda", self.spread_lambda)?;
        require_positive("spread scale", self.spread_scale)?;
        self.swarm.validate()
    }
}
