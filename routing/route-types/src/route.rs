//! Optimization results.
//!
//! [`OptimizationResult`] is what a highway placement run hands back: the best
//! waypoint layout, the edges to draw between nodes, and the route each
//! demand takes through the two-layer graph.

use std::time::Duration;

use nalgebra::Point2;

use crate::demand::Demand;

/// The route one demand takes under the best layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandRoute {
    /// The demand this route serves.
    pub demand: Demand,
    /// Polyline from origin to destination. Empty if unreachable.
    pub points: Vec<Point2<f64>>,
    /// Layered routing cost (unweighted), `None` if unreachable.
    pub cost: Option<f64>,
    /// Number of highway-layer edges the route travels.
    pub highway_edges: usize,
}

impl DemandRoute {
    /// Creates a route for a demand with no path.
    #[must_use]
    pub const fn unreachable(demand: Demand) -> Self {
        Self {
            demand,
            points: Vec::new(),
            cost: None,
            highway_edges: 0,
        }
    }

    /// Returns `true` if a path was found.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    /// Returns `true` if the route uses the highway layer.
    #[must_use]
    pub const fn uses_highway(&self) -> bool {
        self.highway_edges > 0
    }

    /// Euclidean length of the polyline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .sum()
    }
}

/// Statistics about an optimization run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationStats {
    /// Swarm iterations completed.
    pub iterations: usize,
    /// Particles in the swarm.
    pub particles: usize,
    /// Fitness evaluations performed, including initialization.
    pub evaluations: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Global best cost after initialization and after each iteration.
    pub cost_history: Vec<f64>,
}

impl OptimizationStats {
    /// Cost reduction from the initial swarm to the final global best.
    ///
    /// Returns 0.0 if the history is empty.
    #[must_use]
    pub fn improvement(&self) -> f64 {
        match (self.cost_history.first(), self.cost_history.last()) {
            (Some(first), Some(last)) => first - last,
            _ => 0.0,
        }
    }
}

/// The outcome of a highway placement run.
///
/// Node indices in [`OptimizationResult::edges`] refer to
/// [`OptimizationResult::all_nodes`]: anchors first, then waypoints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Best waypoint layout found.
    pub waypoints: Vec<Point2<f64>>,
    /// Visible node pairs `(u, v)` with `u < v`, without duplicates.
    pub edges: Vec<(usize, usize)>,
    /// Fitness of the best layout.
    pub best_cost: f64,
    /// Anchors followed by waypoints.
    pub all_nodes: Vec<Point2<f64>>,
    /// One route per demand, in demand order.
    pub demand_routes: Vec<DemandRoute>,
    /// Run statistics.
    pub stats: OptimizationStats,
}

impl OptimizationResult {
    /// Returns the polyline of every demand, in demand order.
    ///
    /// Unreachable demands yield an empty polyline.
    #[must_use]
    pub fn demand_paths(&self) -> Vec<Vec<Point2<f64>>> {
        self.demand_routes
            .iter()
            .map(|r| r.points.clone())
            .collect()
    }

    /// Iterates over the edges as coordinate pairs.
    pub fn edge_segments(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.edges
            .iter()
            .filter_map(|&(u, v)| Some((*self.all_nodes.get(u)?, *self.all_nodes.get(v)?)))
    }

    /// Number of demands with no path under the best layout.
    #[must_use]
    pub fn unreachable_demands(&self) -> usize {
        self.demand_routes
            .iter()
            .filter(|r| !r.is_reachable())
            .count()
    }

    /// Number of demands whose route uses the highway layer.
    #[must_use]
    pub fn highway_demands(&self) -> usize {
        self.demand_routes
            .iter()
            .filter(|r| r.uses_highway())
            .count()
    }
}

impl std::fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Highways: {} waypoints, {} edges, cost {:.2} ({} of {} demands on highway, {} unreachable, {} iterations in {:.2?})",
            self.waypoints.len(),
            self.edges.len(),
            self.best_cost,
            self.highway_demands(),
            self.demand_routes.len(),
            self.unreachable_demands(),
            self.stats.iterations,
            self.stats.elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> OptimizationResult {
        let reachable = DemandRoute {
            demand: Demand::new(0, 1, 1.0),
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 4.0),
                Point2::new(6.0, 8.0),
            ],
            cost: Some(10.0),
            highway_edges: 1,
        };
        OptimizationResult {
            waypoints: vec![Point2::new(3.0, 4.0)],
            edges: vec![(0, 2), (1, 2)],
            best_cost: 10.0,
            all_nodes: vec![
                Point2::new(0.0, 0.0),
                Point2::new(6.0, 8.0),
                Point2::new(3.0, 4.0),
            ],
            demand_routes: vec![reachable, DemandRoute::unreachable(Demand::new(1, 0, 2.0))],
            stats: OptimizationStats {
                iterations: 5,
                particles: 4,
                evaluations: 24,
                elapsed: Duration::from_millis(3),
                cost_history: vec![50.0, 20.0, 10.0],
            },
        }
    }

    #[test]
    fn test_demand_route_length() {
        let result = sample();
        assert_relative_eq!(result.demand_routes[0].length(), 10.0);
        assert_relative_eq!(result.demand_routes[1].length(), 0.0);
    }

    #[test]
    fn test_counts() {
        let result = sample();
        assert_eq!(result.unreachable_demands(), 1);
        assert_eq!(result.highway_demands(), 1);
        assert!(!result.demand_routes[1].is_reachable());
    }

    #[test]
    fn test_demand_paths() {
        let paths = sample().demand_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 3);
        assert!(paths[1].is_empty());
    }

    #[test]
    fn test_edge_segments() {
        let result = sample();
        let segments: Vec<_> = result.edge_segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], (Point2::new(6.0, 8.0), Point2::new(3.0, 4.0)));
    }

    #[test]
    fn test_improvement() {
        assert_relative_eq!(sample().stats.improvement(), 40.0);
        assert_relative_eq!(OptimizationStats::default().improvement(), 0.0);
    }

    #[test]
    fn test_display() {
        let s = sample().to_string();
        assert!(s.contains("1 waypoints"));
        assert!(s.contains("1 unreachable"));
    }
}
