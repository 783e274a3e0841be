//! Fitness of a candidate waypoint layout.
//!
//! The fitness of a layout is the sum of three terms:
//!
//! 1. **Hard penalty**: `big_penalty` for each waypoint that is outside the
//!    bounds or on land. A waypoint that is both counts once.
//! 2. **Routing cost**: for each demand, `weight * cost` of the cheapest route
//!    through the layered graph, or `big_penalty` if there is none.
//! 3. **Spread penalty**: `spread_lambda * sum(exp(-d / spread_scale))` over
//!    waypoint pairs, discouraging waypoints from bunching up. Off by default.
//!
//! The evaluator only borrows the problem and configuration, so it is `Sync`
//! and particles can be scored concurrently.
//!
//! # Example
//!
//! ```
//! use route_optimize::FitnessEvaluator;
//! use route_types::{Anchor, Demand, HighwayConfig, HighwayProblem};
//! use cf_planar::Bounds;
//! use nalgebra::Point2;
//!
//! let problem = HighwayProblem::new(Bounds::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1000.0, 1000.0),
//! ))
//! .with_anchors([Anchor::at(0.0, 0.0), Anchor::at(200.0, 0.0)])
//! .with_demand(Demand::new(0, 1, 2.0));
//! let config = HighwayConfig::default();
//! let evaluator = FitnessEvaluator::new(&problem, &config);
//!
//! // One waypoint far away: the demand goes straight across the water
//! let cost = evaluator.evaluate(&[Point2::new(900.0, 900.0)]);
//! assert_eq!(cost, 2.0 * 200.0);
//!
//! // The same waypoint outside the bounds adds the hard penalty
//! let cost = evaluator.evaluate(&[Point2::new(-5.0, 900.0)]);
//! assert_eq!(cost, 1e7 + 400.0);
//! ```

use cf_planar::point_on_any_land;
use hashbrown::HashMap;
use nalgebra::Point2;
use route_pathfind::{RoutingGraph, ShortestPathTree};
use route_types::{HighwayConfig, HighwayProblem};

use crate::swarm::Objective;

/// The individual terms of a fitness value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessBreakdown {
    /// Waypoints that are out of bounds or on land.
    pub invalid_waypoints: usize,
    /// `invalid_waypoints * big_penalty`.
    pub hard_penalty: f64,
    /// Weighted routing cost, including penalties for unreachable demands.
    pub routing_cost: f64,
    /// Demands with no route.
    pub unreachable_demands: usize,
    /// Waypoint spread penalty.
    pub spread_penalty: f64,
}

impl FitnessBreakdown {
    /// The fitness value: hard penalty plus routing cost plus spread penalty.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.hard_penalty + self.routing_cost + self.spread_penalty
    }

    /// Returns `true` if no waypoint was penalized and every demand was routed.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.invalid_waypoints == 0 && self.unreachable_demands == 0
    }
}

/// Scores waypoint layouts for one problem and configuration.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    problem: &'a HighwayProblem,
    config: &'a HighwayConfig,
    anchors: Vec<Point2<f64>>,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator.
    ///
    /// Inputs are not validated here; the entry point validates them before
    /// any evaluation.
    #[must_use]
    pub fn new(problem: &'a HighwayProblem, config: &'a HighwayConfig) -> Self {
        Self {
            problem,
            config,
            anchors: problem.anchor_positions(),
        }
    }

    /// Returns the problem.
    #[must_use]
    pub const fn problem(&self) -> &'a HighwayProblem {
        self.problem
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &'a HighwayConfig {
        self.config
    }

    /// Anchors followed by the layout.
    #[must_use]
    pub fn node_set(&self, layout: &[Point2<f64>]) -> Vec<Point2<f64>> {
        let mut nodes = Vec::with_capacity(self.anchors.len() + layout.len());
        nodes.extend_from_slice(&self.anchors);
        nodes.extend_from_slice(layout);
        nodes
    }

    /// Builds the layered graph for a layout.
    #[must_use]
    pub fn layered_graph(&self, layout: &[Point2<f64>]) -> RoutingGraph {
        RoutingGraph::layered(
            &self.node_set(layout),
            self.problem.obstacles(),
            self.config.radius(),
            self.config.layer_costs(),
            self.anchors.len(),
        )
    }

    /// Returns `true` if a waypoint is outside the bounds or on land.
    #[must_use]
    pub fn is_invalid_waypoint(&self, waypoint: &Point2<f64>) -> bool {
        !self.problem.bounds().contains(waypoint)
            || point_on_any_land(waypoint, self.problem.obstacles())
    }

    /// Scores a layout.
    #[must_use]
    pub fn evaluate(&self, layout: &[Point2<f64>]) -> f64 {
        self.breakdown(layout).total()
    }

    /// Scores a flat position vector read as `(x, y)` pairs.
    #[must_use]
    pub fn evaluate_flat(&self, position: &[f64]) -> f64 {
        self.evaluate(&unflatten_layout(position))
    }

    /// Scores a layout and reports each term separately.
    #[must_use]
    pub fn breakdown(&self, layout: &[Point2<f64>]) -> FitnessBreakdown {
        let big_penalty = self.config.big_penalty();

        let invalid_waypoints = layout
            .iter()
            .filter(|w| self.is_invalid_waypoint(w))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let hard_penalty = invalid_waypoints as f64 * big_penalty;

        let graph = self.layered_graph(layout);
        let mut trees: HashMap<usize, ShortestPathTree> = HashMap::new();
        let mut routing_cost = 0.0;
        let mut unreachable_demands = 0;
        for demand in self.problem.demands() {
            let tree = trees
                .entry(demand.origin())
                .or_insert_with(|| ShortestPathTree::build(&graph, demand.origin()));
            let cost = tree.cost_to(demand.destination());
            if cost.is_finite() {
                routing_cost += demand.weight() * cost;
            } else {
                routing_cost += big_penalty;
                unreachable_demands += 1;
            }
        }

        FitnessBreakdown {
            invalid_waypoints,
            hard_penalty,
            routing_cost,
            unreachable_demands,
            spread_penalty: self.spread_penalty(layout),
        }
    }

    /// `spread_lambda * sum(exp(-d / spread_scale))` over waypoint pairs.
    #[must_use]
    pub fn spread_penalty(&self, layout: &[Point2<f64>]) -> f64 {
        let lambda = self.config.spread_lambda();
        if lambda == 0.0 {
            return 0.0;
        }
        let scale = self.config.spread_scale();
        let mut sum = 0.0;
        for (i, a) in layout.iter().enumerate() {
            for b in &layout[i + 1..] {
                sum += (-nalgebra::distance(a, b) / scale).exp();
            }
        }
        lambda * sum
    }
}

impl Objective for FitnessEvaluator<'_> {
    fn evaluate(&self, position: &[f64]) -> f64 {
        self.evaluate_flat(position)
    }
}

/// Flattens a layout into `[x0, y0, x1, y1, ...]`.
#[must_use]
pub fn flatten_layout(layout: &[Point2<f64>]) -> Vec<f64> {
    layout.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Reads `[x0, y0, x1, y1, ...]` as points. A trailing odd value is ignored.
#[must_use]
pub fn unflatten_layout(position: &[f64]) -> Vec<Point2<f64>> {
    position
        .chunks_exact(2)
        .map(|xy| Point2::new(xy[0], xy[1]))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cf_planar::{Bounds, Obstacle};
    use route_types::{Anchor, Demand, LayerCosts};

    fn island() -> Obstacle {
        Obstacle::new(vec![
            Point2::new(400.0, -200.0),
            Point2::new(600.0, -200.0),
            Point2::new(600.0, 200.0),
            Point2::new(400.0, 200.0),
        ])
    }

    /// Two ports 1000 apart with an island between them.
    fn strait() -> HighwayProblem {
        HighwayProblem::new(Bounds::new(
            Point2::new(-100.0, -500.0),
            Point2::new(1100.0, 500.0),
        ))
        .with_anchors([Anchor::at(0.0, 0.0), Anchor::at(1000.0, 0.0)])
        .with_demand(Demand::new(0, 1, 1.0))
        .with_obstacle(island())
    }

    #[test]
    fn test_unreachable_demand_costs_big_penalty() {
        let problem = strait();
        let config = HighwayConfig::default().with_radius(2000.0);
        let evaluator = FitnessEvaluator::new(&problem, &config);

        let breakdown = evaluator.breakdown(&[]);
        assert_eq!(breakdown.unreachable_demands, 1);
        assert_relative_eq!(breakdown.total(), config.big_penalty());
        assert!(!breakdown.is_feasible());
    }

    #[test]
    fn test_clearing_waypoint_gives_detour_cost() {
        let problem = strait();
        let config = HighwayConfig::default().with_radius(600.0);
        let evaluator = FitnessEvaluator::new(&problem, &config);

        let waypoint = Point2::new(500.0, 300.0);
        let breakdown = evaluator.breakdown(&[waypoint]);
        let detour = 2.0 * nalgebra::distance(&Point2::new(0.0, 0.0), &waypoint);
        assert!(breakdown.is_feasible());
        assert_relative_eq!(breakdown.total(), detour, epsilon = 1e-9);
    }

    #[test]
    fn test_hard_penalty_counts_once_per_waypoint() {
        let problem = strait();
        let config = HighwayConfig::default();
        let evaluator = FitnessEvaluator::new(&problem, &config);

        // Out of bounds only, on land only
        let out = Point2::new(5000.0, 0.0);
        let land = Point2::new(500.0, 0.0);
        assert!(evaluator.is_invalid_waypoint(&out));
        assert!(evaluator.is_invalid_waypoint(&land));

        let breakdown = evaluator.breakdown(&[out, land, Point2::new(0.0, 400.0)]);
        assert_eq!(breakdown.invalid_waypoints, 2);
        assert_relative_eq!(breakdown.hard_penalty, 2.0 * config.big_penalty());
    }

    #[test]
    fn test_out_of_bounds_and_on_land_counts_once() {
        // Island that extends past the bounds
        let problem = HighwayProblem::new(Bounds::new(
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 100.0),
        ))
        .with_anchor(Anchor::at(10.0, 10.0))
        .with_demand(Demand::new(0, 0, 1.0))
        .with_obstacle(Obstacle::new(vec![
            Point2::new(50.0, 50.0),
            Point2::new(300.0, 50.0),
            Point2::new(300.0, 300.0),
            Point2::new(50.0, 300.0),
        ]));
        let config = HighwayConfig::default();
        let evaluator = FitnessEvaluator::new(&problem, &config);

        let both = Point2::new(200.0, 200.0);
        let breakdown = evaluator.breakdown(&[both]);
        assert_eq!(breakdown.invalid_waypoints, 1);
        assert_relative_eq!(breakdown.total(), config.big_penalty());
    }

    #[test]
    fn test_boundary_waypoint_is_valid() {
        let problem = strait();
        let config = HighwayConfig::default();
        let evaluator = FitnessEvaluator::new(&problem, &config);
        assert!(!evaluator.is_invalid_waypoint(&Point2::new(-100.0, 500.0)));
        assert!(!evaluator.is_invalid_waypoint(&Point2::new(400.0, 0.0)));
    }

    #[test]
    fn test_demand_weight_scales_cost() {
        let problem = HighwayProblem::new(Bounds::new(
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 100.0),
        ))
        .with_anchors([Anchor::at(0.0, 0.0), Anchor::at(30.0, 40.0)])
        .with_demands([Demand::new(0, 1, 3.0), Demand::new(1, 0, 0.5)]);
        let config = HighwayConfig::default();
        let evaluator = FitnessEvaluator::new(&problem, &config);
        assert_relative_eq!(evaluator.evaluate(&[Point2::new(99.0, 0.0)]), 3.5 * 50.0);
    }

    #[test]
    fn test_local_demand_is_free() {
        let problem = strait().with_demand(Demand::new(1, 1, 5.0));
        let config = HighwayConfig::default().with_radius(600.0);
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let breakdown = evaluator.breakdown(&[Point2::new(500.0, 300.0)]);
        assert_eq!(breakdown.unreachable_demands, 0);
    }

    #[test]
    fn test_highway_lowers_cost() {
        let problem = HighwayProblem::new(Bounds::new(
            Point2::new(0.0, -100.0),
            Point2::new(1000.0, 100.0),
        ))
        .with_anchors([Anchor::at(0.0, 0.0), Anchor::at(1000.0, 0.0)])
        .with_demand(Demand::new(0, 1, 1.0));
        let config = HighwayConfig::default()
            .with_radius(2000.0)
            .with_layer_costs(LayerCosts::default().with_highway(0.1).with_switch(1.0));
        let evaluator = FitnessEvaluator::new(&problem, &config);

        let far_apart = [Point2::new(10.0, 0.0), Point2::new(990.0, 0.0)];
        let close = [Point2::new(500.0, 0.0), Point2::new(501.0, 0.0)];
        assert!(evaluator.evaluate(&far_apart) < evaluator.evaluate(&close));
        assert!(evaluator.evaluate(&far_apart) < 1000.0);
    }

    #[test]
    fn test_spread_penalty() {
        let problem = strait();
        let config = HighwayConfig::default().with_spread(10.0, 100.0);
        let evaluator = FitnessEvaluator::new(&problem, &config);

        let layout = [Point2::new(0.0, 300.0), Point2::new(100.0, 300.0)];
        assert_relative_eq!(
            evaluator.spread_penalty(&layout),
            10.0 * (-1.0f64).exp(),
            epsilon = 1e-12
        );
        assert_relative_eq!(evaluator.spread_penalty(&layout[..1]), 0.0);

        let off = HighwayConfig::default();
        let evaluator = FitnessEvaluator::new(&problem, &off);
        assert_relative_eq!(evaluator.spread_penalty(&layout), 0.0);
    }

    #[test]
    fn test_flat_and_point_evaluation_agree() {
        let problem = strait();
        let config = HighwayConfig::default().with_radius(600.0);
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let layout = vec![Point2::new(500.0, 300.0), Point2::new(200.0, -300.0)];
        let flat = flatten_layout(&layout);
        assert_eq!(flat, vec![500.0, 300.0, 200.0, -300.0]);
        assert_eq!(unflatten_layout(&flat), layout);
        assert_eq!(evaluator.evaluate_flat(&flat), evaluator.evaluate(&layout));
        assert_eq!(
            Objective::evaluate(&evaluator, &flat),
            evaluator.evaluate(&layout)
        );
    }

    #[test]
    fn test_node_set_order() {
        let problem = strait();
        let config = HighwayConfig::default();
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let nodes = evaluator.node_set(&[Point2::new(1.0, 2.0)]);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2], Point2::new(1.0, 2.0));
        let graph = evaluator.layered_graph(&[Point2::new(1.0, 2.0)]);
        assert_eq!(graph.node_count(), 6);
    }
}
