//! Turns the best layout into a displayable result.
//!
//! The visibility edges come from the single-layer graph, so they show which
//! nodes can see each other regardless of layer. Demand routes come from the
//! layered graph and are mapped back to node positions; the two copies of a
//! node collapse into one point, so a mode switch never shows up as a
//! zero-length segment.

use nalgebra::Point2;
use route_pathfind::{Layer, RoutingGraph, ShortestPath, shortest_path};
use route_types::{
    Demand, DemandRoute, HighwayConfig, HighwayProblem, OptimizationResult, OptimizationStats,
};

use crate::fitness::FitnessEvaluator;

/// Builds the [`OptimizationResult`] for a layout.
#[must_use]
pub fn assemble_result(
    problem: &HighwayProblem,
    config: &HighwayConfig,
    layout: Vec<Point2<f64>>,
    best_cost: f64,
    stats: OptimizationStats,
) -> OptimizationResult {
    let evaluator = FitnessEvaluator::new(problem, config);
    let all_nodes = evaluator.node_set(&layout);

    let visibility = RoutingGraph::visibility(&all_nodes, problem.obstacles(), config.radius());
    let edges = visibility.undirected_edges();

    let layered = evaluator.layered_graph(&layout);
    let demand_routes = problem
        .demands()
        .iter()
        .map(|demand| {
            let route = shortest_path(&layered, demand.origin(), demand.destination());
            demand_route(&layered, &all_nodes, *demand, &route)
        })
        .collect();

    OptimizationResult {
        waypoints: layout,
        edges,
        best_cost,
        all_nodes,
        demand_routes,
        stats,
    }
}

/// Maps a layered shortest path back to node positions.
#[must_use]
pub fn demand_route(
    graph: &RoutingGraph,
    nodes: &[Point2<f64>],
    demand: Demand,
    route: &ShortestPath,
) -> DemandRoute {
    if !route.is_reachable() {
        return DemandRoute::unreachable(demand);
    }

    let mut indices: Vec<usize> = route.path.iter().map(|&i| graph.base_index(i)).collect();
    indices.dedup();
    let points = indices
        .iter()
        .filter_map(|&i| nodes.get(i).copied())
        .collect();

    let highway_edges = route
        .path
        .windows(2)
        .filter(|w| w.iter().all(|&i| graph.layer_of(i) == Layer::Highway))
        .count();

    DemandRoute {
        demand,
        points,
        cost: Some(route.cost),
        highway_edges,
    }
}
