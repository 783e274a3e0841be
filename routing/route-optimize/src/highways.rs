//! The highway placement entry point.
//!
//! [`optimize_highways`] validates its inputs, searches for the waypoint
//! layout with the lowest fitness using a particle swarm, and assembles the
//! result.
//!
//! # Example
//!
//! ```
//! use route_optimize::optimize_highways;
//! use route_types::{Anchor, Demand, HighwayConfig, HighwayProblem, SwarmConfig};
//! use cf_planar::{Bounds, Obstacle};
//! use nalgebra::Point2;
//!
//! let problem = HighwayProblem::new(Bounds::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1000.0, 600.0),
//! ))
//! .with_anchors([Anchor::at(100.0, 300.0), Anchor::at(900.0, 300.0)])
//! .with_demand(Demand::new(0, 1, 1.0))
//! .with_obstacle(Obstacle::new(vec![
//!     Point2::new(450.0, 150.0),
//!     Point2::new(550.0, 150.0),
//!     Point2::new(550.0, 450.0),
//!     Point2::new(450.0, 450.0),
//! ]));
//!
//! let config = HighwayConfig::default()
//!     .with_waypoint_count(2)
//!     .with_radius(500.0)
//!     .with_swarm(SwarmConfig::default().with_particles(12).with_iterations(10).with_seed(5));
//!
//! let result = optimize_highways(&problem, &config).unwrap();
//! assert_eq!(result.waypoints.len(), 2);
//! assert_eq!(result.all_nodes.len(), 4);
//! assert_eq!(result.demand_routes.len(), 1);
//! assert_eq!(result.stats.cost_history.len(), 11);
//! ```

use std::time::Instant;

use route_types::{
    HighwayConfig, HighwayProblem, OptimizationResult, OptimizationStats, RoutingError,
};
use tracing::info;

use crate::assemble::assemble_result;
use crate::cancel::CancelToken;
use crate::fitness::{FitnessEvaluator, unflatten_layout};
use crate::swarm::{SearchSpace, SwarmOptimizer};

/// Finds a waypoint layout that minimizes the total routing cost.
///
/// # Errors
///
/// - [`RoutingError::InvalidConfig`] for invalid parameters or bounds
/// - [`RoutingError::InvalidProblem`], [`RoutingError::AnchorOutOfRange`] or
///   [`RoutingError::Geometry`] for an unusable problem
///
/// Unreachable demands are not errors; they show up as penalized cost and
/// empty routes.
pub fn optimize_highways(
    problem: &HighwayProblem,
    config: &HighwayConfig,
) -> Result<OptimizationResult, RoutingError> {
    optimize_highways_with_cancel(problem, config, None)
}

/// Like [`optimize_highways`], checking `cancel` at every iteration boundary.
///
/// # Errors
///
/// Everything [`optimize_highways`] reports, plus [`RoutingError::Cancelled`]
/// if the token is cancelled before the run completes.
pub fn optimize_highways_with_cancel(
    problem: &HighwayProblem,
    config: &HighwayConfig,
    cancel: Option<&CancelToken>,
) -> Result<OptimizationResult, RoutingError> {
    config.validate()?;
    problem.validate()?;

    let start = Instant::now();
    let swarm_config = config.swarm();
    info!(
        anchors = problem.anchor_count(),
        demands = problem.demands().len(),
        obstacles = problem.obstacles().len(),
        waypoints = config.waypoint_count(),
        particles = swarm_config.particles(),
        iterations = swarm_config.iterations(),
        parallel = swarm_config.parallel(),
        "starting highway optimization"
    );

    let evaluator = FitnessEvaluator::new(problem, config);
    let space = SearchSpace::tiled(problem.bounds(), config.waypoint_count())?;
    let optimizer = SwarmOptimizer::new(&evaluator, space, swarm_config.clone());
    let outcome = optimizer.run_with_cancel(cancel)?;

    let stats = OptimizationStats {
        iterations: outcome.iterations,
        particles: swarm_config.particles(),
        evaluations: outcome.evaluations,
        elapsed: start.elapsed(),
        cost_history: outcome.cost_history,
    };
    let layout = unflatten_layout(&outcome.best_position);
    let result = assemble_result(problem, config, layout, outcome.best_cost, stats);

    info!(
        best_cost = result.best_cost,
        edges = result.edges.len(),
        unreachable = result.unreachable_demands(),
        elapsed_ms = result.stats.elapsed.as_millis(),
        "highway optimization finished"
    );
    Ok(result)
}
